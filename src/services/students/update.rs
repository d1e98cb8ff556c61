use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::requests::{UpdateStudentRecord, UpdateStudentRequest},
};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_name, validate_password, validate_register_number, validate_year,
};

/// 校验更新请求中出现的字段（密码尚未哈希）
pub(crate) fn validate_update(
    req: UpdateStudentRequest,
) -> Result<UpdateStudentRecord, (ErrorCode, String)> {
    let invalid = |msg: &str| (ErrorCode::ValidationFailed, msg.to_string());

    let name = req.name.map(|name| name.trim().to_string());
    if let Some(name) = &name {
        validate_name(name).map_err(invalid)?;
    }

    let register_number = req.register_number.map(|n| n.trim().to_string());
    if let Some(number) = &register_number {
        validate_register_number(number).map_err(invalid)?;
    }

    let email = req.email.map(|email| email.trim().to_lowercase());
    if let Some(email) = &email {
        validate_email(email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg.to_string()))?;
    }

    if let Some(password) = &req.password {
        validate_password(password).map_err(|msg| (ErrorCode::UserPasswordInvalid, msg))?;
    }

    let year = match req.year {
        Some(year) => Some(validate_year(year).map_err(|msg| (ErrorCode::ValidationFailed, msg))?),
        None => None,
    };

    Ok(UpdateStudentRecord {
        name,
        email,
        password: req.password,
        register_number,
        branch_id: req.branch_id,
        year,
    })
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut record = match validate_update(update_data) {
        Ok(record) => record,
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    let storage = service.get_storage(request)?;

    if let Some(branch_id) = record.branch_id {
        match storage.get_branch_by_id(branch_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BranchNotFound,
                    "Branch not found",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to load branch", e)),
        }
    }

    if let Some(password) = &record.password {
        record.password = match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Password hashing failed", e)),
        };
    }

    match storage.update_student(student_id, record).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(student, "Student updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "A user with this email or register number already exists",
            ),
        )),
        Err(e) => Ok(internal_error("Student update failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validate_update_only_checks_present_fields() {
        let record = validate_update(UpdateStudentRequest {
            name: Some(" Jim ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("Jim"));
        assert!(record.email.is_none());

        let err = validate_update(UpdateStudentRequest {
            year: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.0, ErrorCode::ValidationFailed);
    }

    #[actix_web::test]
    async fn test_update_moves_student_to_another_year() {
        let storage = memory_storage().await;
        let branch = storage.create_branch(branch_request("CSE")).await.unwrap();
        let student = storage
            .create_student(student_request("21CS010", branch.id, 1))
            .await
            .unwrap();
        let req = request(&storage, None);

        let resp = StudentService::new_lazy()
            .update_student(
                student.id,
                UpdateStudentRequest {
                    year: Some(2),
                    ..Default::default()
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["year"], 2);
        assert_eq!(body["data"]["registerNumber"], "21CS010");

        let missing = StudentService::new_lazy()
            .update_student(9999, UpdateStudentRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
