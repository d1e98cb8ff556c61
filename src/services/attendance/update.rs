use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::parse_attendance_date,
        requests::{UpdateAttendanceRequest, UpsertAttendanceRequest},
    },
};
use crate::services::{current_user, internal_error};

pub async fn update_attendance(
    service: &AttendanceService,
    update_data: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let Some(student_id) = update_data.student_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "studentId is required",
        )));
    };

    // 时间戳与日期都只取到天
    let date = match parse_attendance_date(&update_data.date) {
        Ok(date) => date,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceInvalid,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load student", e)),
    }

    let record = UpsertAttendanceRequest {
        student_id,
        marked_by: user.id,
        date,
        status: update_data.status,
    };

    match storage.upsert_attendance(record).await {
        Ok(record) => {
            debug!(
                "Attendance of student {} on {} set to {}",
                record.student_id, record.date, record.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance updated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to update attendance", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{body_json, memory_storage, request, user};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;
    use crate::storage::sea_orm_storage::teachers::tests::teacher_request;
    use actix_web::http::StatusCode;

    fn update(student_id: i64, date: &str, status: AttendanceStatus) -> UpdateAttendanceRequest {
        UpdateAttendanceRequest {
            student_id: Some(student_id),
            date: date.to_string(),
            status,
        }
    }

    #[actix_web::test]
    async fn test_same_day_overwrites() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let student = storage
            .create_student(student_request("21CS001", cse.id, 1))
            .await
            .unwrap();
        let teacher = storage
            .create_teacher(teacher_request("stanley@uni.edu", vec![]))
            .await
            .unwrap();
        let teacher_id = teacher.teacher.id;
        let req = request(&storage, Some(user(teacher_id, UserRole::Teacher)));
        let service = AttendanceService::new_lazy();

        let resp = service
            .update_attendance(
                update(student.id, "2024-03-05T09:30:00.000Z", AttendanceStatus::Absent),
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["date"], "2024-03-05");

        service
            .update_attendance(update(student.id, "2024-03-05", AttendanceStatus::Present), &req)
            .await
            .unwrap();

        let records = storage.list_student_attendance(student.id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Present);
        assert_eq!(records[0].marked_by, Some(teacher_id));
    }

    #[actix_web::test]
    async fn test_rejects_bad_input() {
        let storage = memory_storage().await;
        let req = request(&storage, Some(user(77, UserRole::Teacher)));
        let service = AttendanceService::new_lazy();

        let resp = service
            .update_attendance(update(1, "05/03/2024", AttendanceStatus::Present), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .update_attendance(update(1, "2024-03-05", AttendanceStatus::Present), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
