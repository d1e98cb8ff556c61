use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 4;

// 某一年级开设的科目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "branch.ts")]
pub struct BranchYear {
    pub year: i32,
    pub subjects: Vec<String>,
}

// 专业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "branch.ts")]
pub struct Branch {
    pub id: i64,
    pub branch_name: String,
    pub years: Vec<BranchYear>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Branch {
    /// 指定年级开设的科目
    pub fn subjects_for_year(&self, year: i32) -> Option<&[String]> {
        self.years
            .iter()
            .find(|y| y.year == year)
            .map(|y| y.subjects.as_slice())
    }

    pub fn offers(&self, year: i32, subject: &str) -> bool {
        self.subjects_for_year(year)
            .is_some_and(|subjects| subjects.iter().any(|s| s == subject))
    }
}

/// 校验并规范化年级课程表
///
/// - 年级必须在 1..=4 且不重复
/// - 科目去除首尾空白，去重并保留首次出现的顺序，不允许为空
/// - 结果按年级升序
pub fn normalize_years(years: Vec<BranchYear>) -> Result<Vec<BranchYear>, String> {
    let mut normalized: Vec<BranchYear> = Vec::with_capacity(years.len());

    for entry in years {
        if !(MIN_YEAR..=MAX_YEAR).contains(&entry.year) {
            return Err(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {}",
                entry.year
            ));
        }
        if normalized.iter().any(|y| y.year == entry.year) {
            return Err(format!("Year {} is listed more than once", entry.year));
        }

        let mut subjects: Vec<String> = Vec::with_capacity(entry.subjects.len());
        for subject in entry.subjects {
            let subject = subject.trim();
            if subject.is_empty() {
                return Err(format!("Year {} contains an empty subject name", entry.year));
            }
            if !subjects.iter().any(|s| s == subject) {
                subjects.push(subject.to_string());
            }
        }
        if subjects.is_empty() {
            return Err(format!("Year {} must have at least one subject", entry.year));
        }

        normalized.push(BranchYear {
            year: entry.year,
            subjects,
        });
    }

    normalized.sort_by_key(|y| y.year);
    Ok(normalized)
}
