use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::{ApiResponse, ErrorCode, marks::entities::StudentMark};
use crate::services::{can_access_student, current_user, forbidden, internal_error};

pub async fn list_student_marks(
    service: &MarkService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !can_access_student(&user, student_id) {
        return Ok(forbidden("You can only view your own marks"));
    }

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

    match storage.list_student_marks(student_id).await {
        Ok(marks) => {
            let marks: Vec<StudentMark> = marks.into_iter().map(StudentMark::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                marks,
                "Marks retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to retrieve marks", e)),
    }
}
