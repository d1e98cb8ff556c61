use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode,
    branches::entities::Branch,
    teachers::requests::{AddTeacherRequest, CreateTeacherRequest, NewAssignment, TeacherBranchInput},
};
use crate::services::internal_error;
use crate::services::students::create::ALL_FIELDS_REQUIRED;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password};

/// 将按专业提交的授课信息展开为 (专业, 年级, 科目) 行
///
/// 每个科目都必须是该专业在该年级开设的科目；重复行只保留首次出现的一条。
pub(crate) fn flatten_assignments(
    inputs: &[TeacherBranchInput],
    catalog: &[Branch],
) -> Result<Vec<NewAssignment>, String> {
    let mut rows: Vec<NewAssignment> = Vec::new();

    for input in inputs {
        let branch_id = input
            .branch_id
            .ok_or_else(|| "Every assignment must specify a branch".to_string())?;
        let branch = catalog
            .iter()
            .find(|b| b.id == branch_id)
            .ok_or_else(|| format!("Branch {branch_id} not found"))?;

        for year in &input.years {
            for subject in &year.subjects {
                let subject = subject.trim();
                if !branch.offers(year.year, subject) {
                    return Err(format!(
                        "Subject '{subject}' is not offered by {} in year {}",
                        branch.branch_name, year.year
                    ));
                }

                let row = NewAssignment {
                    branch_id,
                    year: year.year,
                    subject: subject.to_string(),
                };
                if !rows.contains(&row) {
                    rows.push(row);
                }
            }
        }
    }

    Ok(rows)
}

pub async fn add_teacher(
    service: &TeacherService,
    teacher_data: AddTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = teacher_data.name.trim().to_string();
    let email = teacher_data.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || teacher_data.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            ALL_FIELDS_REQUIRED,
        )));
    }
    if let Err(msg) = validate_name(&name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password(&teacher_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    let catalog = match storage.list_branches().await {
        Ok(branches) => branches,
        Err(e) => return Ok(internal_error("Failed to load branches", e)),
    };
    let assignments = match flatten_assignments(&teacher_data.branches, &catalog) {
        Ok(rows) => rows,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::TeacherAssignmentInvalid,
                msg,
            )));
        }
    };

    let password = match hash_password(&teacher_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let create = CreateTeacherRequest {
        name,
        email,
        password,
        assignments,
    };

    match storage.create_teacher(create).await {
        Ok(teacher) => {
            info!(
                "Teacher {} added with {} branch(es)",
                teacher.teacher.id,
                teacher.branches.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher added successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "A user with this email already exists",
            ),
        )),
        Err(e) => Ok(internal_error("Teacher creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::branches::entities::BranchYear;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use actix_web::http::StatusCode;

    fn year(year: i32, subjects: &[&str]) -> BranchYear {
        BranchYear {
            year,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn branch(id: i64, name: &str, years: Vec<BranchYear>) -> Branch {
        let now = chrono::Utc::now();
        Branch {
            id,
            branch_name: name.to_string(),
            years,
            created_at: now,
            updated_at: now,
        }
    }

    fn input(branch_id: i64, years: Vec<BranchYear>) -> TeacherBranchInput {
        TeacherBranchInput {
            branch_id: Some(branch_id),
            years,
        }
    }

    #[test]
    fn test_flatten_removes_duplicates() {
        let catalog = vec![branch(1, "CSE", vec![year(1, &["Maths", "Physics"])])];
        let rows = flatten_assignments(
            &[
                input(1, vec![year(1, &["Maths", "Physics", "Maths"])]),
                input(1, vec![year(1, &[" Physics "])]),
            ],
            &catalog,
        )
        .unwrap();

        assert_eq!(
            rows,
            vec![
                NewAssignment {
                    branch_id: 1,
                    year: 1,
                    subject: "Maths".to_string(),
                },
                NewAssignment {
                    branch_id: 1,
                    year: 1,
                    subject: "Physics".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_flatten_rejects_unknown_branch_and_subject() {
        let catalog = vec![branch(1, "CSE", vec![year(1, &["Maths"])])];

        let err = flatten_assignments(&[input(2, vec![year(1, &["Maths"])])], &catalog)
            .unwrap_err();
        assert!(err.contains("Branch 2 not found"));

        // 科目存在但不在该年级开设
        let err = flatten_assignments(&[input(1, vec![year(2, &["Maths"])])], &catalog)
            .unwrap_err();
        assert!(err.contains("not offered"));

        let missing = TeacherBranchInput {
            branch_id: None,
            years: vec![],
        };
        assert!(flatten_assignments(&[missing], &catalog).is_err());
    }

    #[actix_web::test]
    async fn test_add_teacher_groups_response() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let req = request(&storage, None);

        let resp = TeacherService::new_lazy()
            .add_teacher(
                AddTeacherRequest {
                    name: "Michael Scott".to_string(),
                    email: "michael@uni.edu".to_string(),
                    password: "dunder@123".to_string(),
                    branches: vec![input(
                        cse.id,
                        vec![year(2, &["Data Structures"]), year(1, &["Maths"])],
                    )],
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["data"]["role"], "teacher");
        let branches = body["data"]["branches"].as_array().unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0]["branchName"], "CSE");
        assert_eq!(branches[0]["years"][0]["year"], 1);
        assert_eq!(branches[0]["years"][1]["year"], 2);
    }

    #[actix_web::test]
    async fn test_add_teacher_requires_fields() {
        let storage = memory_storage().await;
        let req = request(&storage, None);
        let resp = TeacherService::new_lazy()
            .add_teacher(AddTeacherRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["message"], ALL_FIELDS_REQUIRED);
    }
}
