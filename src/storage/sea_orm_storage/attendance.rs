use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, DATE_FORMAT, Entity as Attendance};
use crate::errors::{Result, UniError};
use crate::models::attendance::{entities::AttendanceRecord, requests::UpsertAttendanceRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 写入考勤，同一学生同一天只保留一条记录
    pub async fn upsert_attendance_impl(
        &self,
        req: UpsertAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();
        let date = req.date.format(DATE_FORMAT).to_string();

        let existing = Attendance::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::Date.eq(date.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询考勤失败: {e}")))?;

        let model = match existing {
            Some(existing) => {
                let mut model = existing.into_active_model();
                model.status = Set(req.status.to_string());
                model.marked_by = Set(Some(req.marked_by));
                model.updated_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| UniError::database_operation(format!("更新考勤失败: {e}")))?
            }
            None => ActiveModel {
                student_id: Set(req.student_id),
                marked_by: Set(Some(req.marked_by)),
                date: Set(date),
                status: Set(req.status.to_string()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("写入考勤失败: {e}")))?,
        };

        model.into_record()
    }

    /// 列出学生考勤，按日期排序
    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<AttendanceRecord>> {
        Attendance::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生考勤失败: {e}")))?
            .into_iter()
            .map(|m| m.into_record())
            .collect()
    }

    /// 列出一批学生某天的考勤
    pub async fn list_attendance_on_date_impl(
        &self,
        student_ids: Vec<i64>,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        Attendance::find()
            .filter(Column::StudentId.is_in(student_ids))
            .filter(Column::Date.eq(date.format(DATE_FORMAT).to_string()))
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询考勤表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_record())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::{AttendanceStatus, AttendanceSummary};
    use crate::storage::sea_orm_storage::{
        branches::tests::branch_request, students::tests::student_request,
        teachers::tests::teacher_request,
    };
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_remarking_same_day_overwrites() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();
        let teacher = storage
            .create_teacher_impl(teacher_request("michael@uni.edu", Vec::new()))
            .await
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let next_day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        for (date, status) in [
            (day, AttendanceStatus::Present),
            (day, AttendanceStatus::Absent),
            (next_day, AttendanceStatus::Present),
        ] {
            storage
                .upsert_attendance_impl(UpsertAttendanceRequest {
                    student_id: student.id,
                    marked_by: teacher.teacher.id,
                    date,
                    status,
                })
                .await
                .unwrap();
        }

        let records = storage
            .list_student_attendance_impl(student.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, day);
        assert_eq!(records[0].status, AttendanceStatus::Absent);

        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.percentage, 50.0);

        let sheet = storage
            .list_attendance_on_date_impl(vec![student.id], next_day)
            .await
            .unwrap();
        assert_eq!(sheet.len(), 1);
        assert!(
            storage
                .list_attendance_on_date_impl(Vec::new(), next_day)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
