use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

// 教师授课分配（一行一个 专业 + 年级 + 科目）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherAssignment {
    pub id: i64,
    pub teacher_id: i64,
    pub branch_id: i64,
    pub branch_name: String,
    pub year: i32,
    pub subject: String,
}

// 某年级所授科目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherYear {
    pub year: i32,
    pub subjects: Vec<String>,
}

// 按专业聚合后的授课信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherBranch {
    pub branch_id: i64,
    pub branch_name: String,
    pub years: Vec<TeacherYear>,
}

// 教师详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub teacher: User,
    pub branches: Vec<TeacherBranch>,
}

/// 将授课分配按专业聚合
///
/// 专业按首次出现的顺序输出；同一专业内年级升序且唯一，
/// 每个年级内科目去重并保留首次出现的顺序。
pub fn group_assignments(assignments: &[TeacherAssignment]) -> Vec<TeacherBranch> {
    let mut branches: Vec<TeacherBranch> = Vec::new();

    for assignment in assignments {
        let branch_idx = match branches
            .iter()
            .position(|b| b.branch_id == assignment.branch_id)
        {
            Some(idx) => idx,
            None => {
                branches.push(TeacherBranch {
                    branch_id: assignment.branch_id,
                    branch_name: assignment.branch_name.clone(),
                    years: Vec::new(),
                });
                branches.len() - 1
            }
        };
        let branch = &mut branches[branch_idx];

        let year_idx = match branch.years.iter().position(|y| y.year == assignment.year) {
            Some(idx) => idx,
            None => {
                branch.years.push(TeacherYear {
                    year: assignment.year,
                    subjects: Vec::new(),
                });
                branch.years.len() - 1
            }
        };
        let year = &mut branch.years[year_idx];

        if !year.subjects.contains(&assignment.subject) {
            year.subjects.push(assignment.subject.clone());
        }
    }

    for branch in &mut branches {
        branch.years.sort_by_key(|y| y.year);
    }

    branches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(branch_id: i64, year: i32, subject: &str) -> TeacherAssignment {
        TeacherAssignment {
            id: 0,
            teacher_id: 9,
            branch_id,
            branch_name: format!("Branch {branch_id}"),
            year,
            subject: subject.to_string(),
        }
    }

    #[test]
    fn test_group_merges_rows_of_same_branch() {
        let rows = vec![
            assignment(2, 3, "Compilers"),
            assignment(1, 1, "Maths"),
            assignment(2, 1, "Programming"),
            assignment(2, 3, "Automata"),
            assignment(2, 3, "Compilers"),
        ];

        let grouped = group_assignments(&rows);
        assert_eq!(grouped.len(), 2);

        assert_eq!(grouped[0].branch_id, 2);
        assert_eq!(grouped[0].branch_name, "Branch 2");
        assert_eq!(
            grouped[0].years,
            vec![
                TeacherYear {
                    year: 1,
                    subjects: vec!["Programming".to_string()],
                },
                TeacherYear {
                    year: 3,
                    subjects: vec!["Compilers".to_string(), "Automata".to_string()],
                },
            ]
        );

        assert_eq!(grouped[1].branch_id, 1);
        assert_eq!(grouped[1].years.len(), 1);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_assignments(&[]).is_empty());
    }
}
