use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::parse_attendance_date,
        requests::AttendanceSheetQuery,
        responses::{AttendanceSheetEntry, AttendanceSheetResponse},
    },
};
use crate::services::internal_error;

pub async fn attendance_sheet(
    service: &AttendanceService,
    query: AttendanceSheetQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let date = match parse_attendance_date(&query.date) {
        Ok(date) => date,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceInvalid,
                e.message(),
            )));
        }
    };

    let storage = service.get_storage(request)?;

    let students = match storage
        .list_students_by_class(query.branch_id, query.year)
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(internal_error("Failed to retrieve students", e)),
    };

    let ids = students.iter().map(|s| s.id).collect();
    let marked: HashMap<i64, _> = match storage.list_attendance_on_date(ids, date).await {
        Ok(records) => records.into_iter().map(|r| (r.student_id, r.status)).collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve attendance", e)),
    };

    // 未标记的学生 status 为 null
    let entries = students
        .into_iter()
        .map(|student| AttendanceSheetEntry {
            status: marked.get(&student.id).copied(),
            student_id: student.id,
            register_number: student.register_number,
            name: student.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceSheetResponse { date, entries },
        "Attendance sheet retrieved successfully",
    )))
}
