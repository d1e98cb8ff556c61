//! 考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub marked_by: Option<i64>,
    /// YYYY-MM-DD
    pub date: String,
    pub status: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Model {
    pub fn into_record(
        self,
    ) -> crate::errors::Result<crate::models::attendance::entities::AttendanceRecord> {
        use crate::errors::UniError;
        use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};

        let date = chrono::NaiveDate::parse_from_str(&self.date, DATE_FORMAT)?;
        let status = self
            .status
            .parse::<AttendanceStatus>()
            .map_err(UniError::database_operation)?;

        Ok(AttendanceRecord {
            id: self.id,
            student_id: self.student_id,
            marked_by: self.marked_by,
            date,
            status,
            updated_at: super::timestamp_to_datetime(self.updated_at),
        })
    }
}
