//! 专业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub branch_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::branch_subjects::Entity")]
    BranchSubjects,
    #[sea_orm(has_many = "super::student_profiles::Entity")]
    StudentProfiles,
}

impl Related<super::branch_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchSubjects.def()
    }
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 组装业务实体，`subjects` 需已按 (year, position) 排序
    pub fn into_branch(
        self,
        subjects: Vec<super::branch_subjects::Model>,
    ) -> crate::models::branches::entities::Branch {
        use super::timestamp_to_datetime;
        use crate::models::branches::entities::{Branch, BranchYear};

        let mut years: Vec<BranchYear> = Vec::new();
        for row in subjects {
            match years.last_mut() {
                Some(last) if last.year == row.year => last.subjects.push(row.subject),
                _ => years.push(BranchYear {
                    year: row.year,
                    subjects: vec![row.subject],
                }),
            }
        }

        Branch {
            id: self.id,
            branch_name: self.branch_name,
            years,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
