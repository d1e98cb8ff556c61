use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::requests::{AddStudentRequest, CreateStudentRequest},
};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_name, validate_password, validate_register_number, validate_year,
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required!";

/// 校验添加学生请求，返回待写入的记录（密码尚未哈希）
pub(crate) fn validate_add_student(
    req: AddStudentRequest,
) -> Result<CreateStudentRequest, (ErrorCode, String)> {
    let name = req.name.trim().to_string();
    let register_number = req.register_number.trim().to_string();
    let email = req.email.trim().to_lowercase();

    let (Some(branch_id), Some(year)) = (req.branch_id, req.year) else {
        return Err((ErrorCode::ValidationFailed, ALL_FIELDS_REQUIRED.to_string()));
    };
    if name.is_empty() || register_number.is_empty() || email.is_empty() || req.password.is_empty()
    {
        return Err((ErrorCode::ValidationFailed, ALL_FIELDS_REQUIRED.to_string()));
    }

    validate_name(&name).map_err(|msg| (ErrorCode::ValidationFailed, msg.to_string()))?;
    validate_register_number(&register_number)
        .map_err(|msg| (ErrorCode::ValidationFailed, msg.to_string()))?;
    validate_email(&email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg.to_string()))?;
    validate_password(&req.password).map_err(|msg| (ErrorCode::UserPasswordInvalid, msg))?;
    let year = validate_year(year).map_err(|msg| (ErrorCode::ValidationFailed, msg))?;

    Ok(CreateStudentRequest {
        name,
        email,
        password: req.password,
        register_number,
        branch_id,
        year,
    })
}

pub async fn add_student(
    service: &StudentService,
    student_data: AddStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut student = match validate_add_student(student_data) {
        Ok(student) => student,
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    let storage = service.get_storage(request)?;

    match storage.get_branch_by_id(student.branch_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BranchNotFound,
                "Branch not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load branch", e)),
    }

    student.password = match hash_password(&student.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    match storage.create_student(student).await {
        Ok(student) => {
            info!("Student {} added", student.register_number);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student added successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "A user with this email or register number already exists",
            ),
        )),
        Err(e) => Ok(internal_error("Student creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use actix_web::http::StatusCode;

    fn add_request(branch_id: i64) -> AddStudentRequest {
        AddStudentRequest {
            name: "Pam Beesly".to_string(),
            register_number: "21CS001".to_string(),
            email: "Pam@Uni.edu".to_string(),
            password: "pam@123".to_string(),
            branch_id: Some(branch_id),
            year: Some(2),
        }
    }

    #[test]
    fn test_validate_required_fields() {
        let mut req = add_request(1);
        req.register_number = "   ".to_string();
        let (code, msg) = validate_add_student(req).unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
        assert_eq!(msg, ALL_FIELDS_REQUIRED);

        let mut req = add_request(1);
        req.year = None;
        assert_eq!(validate_add_student(req).unwrap_err().1, ALL_FIELDS_REQUIRED);
    }

    #[test]
    fn test_validate_formats() {
        let mut req = add_request(1);
        req.email = "pam-at-uni".to_string();
        assert_eq!(validate_add_student(req).unwrap_err().0, ErrorCode::UserEmailInvalid);

        let mut req = add_request(1);
        req.year = Some(5);
        assert_eq!(validate_add_student(req).unwrap_err().0, ErrorCode::ValidationFailed);

        let record = validate_add_student(add_request(1)).unwrap();
        assert_eq!(record.email, "pam@uni.edu");
        assert_eq!(record.year, 2);
    }

    #[actix_web::test]
    async fn test_add_student_and_conflict() {
        let storage = memory_storage().await;
        let branch = storage.create_branch(branch_request("CSE")).await.unwrap();
        let req = request(&storage, None);
        let service = StudentService::new_lazy();

        let resp = service.add_student(add_request(branch.id), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["registerNumber"], "21CS001");
        assert_eq!(body["data"]["branchName"], "CSE");

        let again = service.add_student(add_request(branch.id), &req).await.unwrap();
        assert_eq!(again.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_add_student_unknown_branch() {
        let storage = memory_storage().await;
        let req = request(&storage, None);
        let resp = StudentService::new_lazy()
            .add_student(add_request(42), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::BranchNotFound as i32);
    }
}
