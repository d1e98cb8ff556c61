use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::MarkService;
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{
        entities::{MAX_MARKS, MIN_MARKS},
        requests::{AssignMarkEntry, UpsertMarkRequest},
        responses::AssignMarksResponse,
    },
    users::entities::{User, UserRole},
};
use crate::services::{current_user, forbidden, internal_error};
use crate::storage::Storage;
use crate::utils::validate::validate_year;

fn bad_request(code: ErrorCode, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 校验单条成绩的字段，teacherId 缺省时取当前用户
pub(crate) fn parse_entry(
    index: usize,
    entry: &AssignMarkEntry,
    user: &User,
) -> Result<UpsertMarkRequest, HttpResponse> {
    let subject = entry.subject.trim();
    let (Some(student_id), Some(year), Some(marks)) = (entry.student_id, entry.year, entry.marks)
    else {
        return Err(bad_request(
            ErrorCode::MarksInvalid,
            format!("Entry {index}: studentId, subject, year and marks are required"),
        ));
    };
    if subject.is_empty() {
        return Err(bad_request(
            ErrorCode::MarksInvalid,
            format!("Entry {index}: studentId, subject, year and marks are required"),
        ));
    }

    let teacher_id = entry.teacher_id.unwrap_or(user.id);
    // 教师只能以自己的身份录入
    if user.role == UserRole::Teacher && teacher_id != user.id {
        return Err(forbidden("Teachers can only assign marks as themselves"));
    }

    if !(MIN_MARKS as i64..=MAX_MARKS as i64).contains(&marks) {
        return Err(bad_request(
            ErrorCode::MarksInvalid,
            format!("Entry {index}: marks must be between {MIN_MARKS} and {MAX_MARKS}"),
        ));
    }
    let year = validate_year(year)
        .map_err(|msg| bad_request(ErrorCode::MarksInvalid, format!("Entry {index}: {msg}")))?;

    Ok(UpsertMarkRequest {
        student_id,
        teacher_id,
        subject: subject.to_string(),
        year,
        marks: marks as i32,
    })
}

/// 检查学生存在，且教师在该学生所在专业的该年级教授该科目
async fn check_teaching(
    storage: &Arc<dyn Storage>,
    index: usize,
    mark: &UpsertMarkRequest,
    taught: &mut HashMap<(i64, i64, i32), Vec<String>>,
) -> Result<(), HttpResponse> {
    let student = match storage.get_student_by_id(mark.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                format!("Entry {index}: student {} not found", mark.student_id),
            )));
        }
        Err(e) => return Err(internal_error("Failed to load student", e)),
    };

    if mark.year > student.year {
        return Err(bad_request(
            ErrorCode::MarksInvalid,
            format!(
                "Entry {index}: student {} has not reached year {}",
                student.register_number, mark.year
            ),
        ));
    }

    let key = (mark.teacher_id, student.branch_id, mark.year);
    if !taught.contains_key(&key) {
        let subjects = storage
            .list_teacher_subjects(mark.teacher_id, student.branch_id, mark.year)
            .await
            .map_err(|e| internal_error("Failed to load teacher subjects", e))?;
        taught.insert(key, subjects);
    }

    let teaches = taught
        .get(&key)
        .is_some_and(|subjects| subjects.iter().any(|s| s == &mark.subject));
    if !teaches {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotAssigned,
            format!(
                "Entry {index}: teacher does not teach {} to {} year {}",
                mark.subject, student.branch_name, mark.year
            ),
        )));
    }

    Ok(())
}

pub async fn assign_marks(
    service: &MarkService,
    entries: Vec<AssignMarkEntry>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if entries.is_empty() {
        return Ok(bad_request(
            ErrorCode::MarksInvalid,
            "No marks provided".to_string(),
        ));
    }

    let mut marks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(index, entry, &user) {
            Ok(mark) => marks.push(mark),
            Err(resp) => return Ok(resp),
        }
    }

    let storage = service.get_storage(request)?;

    // 全部校验通过后才写入
    let mut taught = HashMap::new();
    for (index, mark) in marks.iter().enumerate() {
        if let Err(resp) = check_teaching(&storage, index, mark, &mut taught).await {
            return Ok(resp);
        }
    }

    match storage.upsert_marks(marks).await {
        Ok(saved) => {
            info!("User {} assigned {} mark(s)", user.id, saved.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AssignMarksResponse {
                    assigned: saved.len(),
                    marks: saved,
                },
                "Marks assigned successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to assign marks", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request, user};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;
    use crate::storage::sea_orm_storage::teachers::tests::{assignment, teacher_request};
    use actix_web::http::StatusCode;

    fn entry(teacher_id: i64, student_id: i64, subject: &str, year: i64, marks: i64) -> AssignMarkEntry {
        AssignMarkEntry {
            teacher_id: Some(teacher_id),
            student_id: Some(student_id),
            subject: subject.to_string(),
            year: Some(year),
            marks: Some(marks),
        }
    }

    #[test]
    fn test_parse_entry_rules() {
        let teacher = user(7, UserRole::Teacher);

        let ok = parse_entry(0, &entry(7, 1, " Maths ", 1, 100), &teacher).unwrap();
        assert_eq!(ok.subject, "Maths");
        assert_eq!(ok.marks, 100);

        let resp = parse_entry(0, &entry(7, 1, "Maths", 1, 101), &teacher).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = parse_entry(0, &entry(7, 1, "Maths", 1, -1), &teacher).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 不能替其他教师录入
        let resp = parse_entry(0, &entry(8, 1, "Maths", 1, 90), &teacher).unwrap_err();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 管理员可以指定教师
        let admin = user(1, UserRole::Admin);
        assert_eq!(
            parse_entry(0, &entry(8, 1, "Maths", 1, 90), &admin)
                .unwrap()
                .teacher_id,
            8
        );

        let mut missing = entry(7, 1, "Maths", 1, 90);
        missing.marks = None;
        assert!(parse_entry(0, &missing, &teacher).is_err());
    }

    #[actix_web::test]
    async fn test_assign_marks_upserts_and_validates_teaching() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let teacher = storage
            .create_teacher(teacher_request("oscar@uni.edu", vec![assignment(cse.id, 1, "Maths")]))
            .await
            .unwrap();
        let student = storage
            .create_student(student_request("21CS001", cse.id, 1))
            .await
            .unwrap();
        let teacher_id = teacher.teacher.id;
        let req = request(&storage, Some(user(teacher_id, UserRole::Teacher)));
        let service = MarkService::new_lazy();

        let resp = service
            .assign_marks(vec![entry(teacher_id, student.id, "Maths", 1, 40)], &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = service
            .assign_marks(vec![entry(teacher_id, student.id, "Maths", 1, 75)], &req)
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["assigned"], 1);

        let saved = storage.list_student_marks(student.id).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].marks, 75);

        // Physics 属于该专业一年级，但不是该教师的科目；整批都不写入
        let resp = service
            .assign_marks(
                vec![
                    entry(teacher_id, student.id, "Maths", 1, 10),
                    entry(teacher_id, student.id, "Physics", 1, 80),
                ],
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let saved = storage.list_student_marks(student.id).await.unwrap();
        assert_eq!(saved[0].marks, 75);
    }

    #[actix_web::test]
    async fn test_assign_marks_rejects_empty_and_unknown_student() {
        let storage = memory_storage().await;
        let req = request(&storage, Some(user(3, UserRole::Teacher)));
        let service = MarkService::new_lazy();

        let resp = service.assign_marks(vec![], &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .assign_marks(vec![entry(3, 999, "Maths", 1, 50)], &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
