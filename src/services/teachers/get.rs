use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::{current_user, forbidden, internal_error};

pub async fn get_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 教师只能查看自己，管理员可查看任意教师
    if user.role != UserRole::Admin && user.id != teacher_id {
        return Ok(forbidden("You can only view your own profile"));
    }

    let storage = service.get_storage(request)?;

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve teacher", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request, user};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::teachers::tests::{assignment, teacher_request};
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_teacher_reads_only_self() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let teacher = storage
            .create_teacher(teacher_request(
                "michael@uni.edu",
                vec![assignment(cse.id, 1, "Maths"), assignment(cse.id, 1, "Physics")],
            ))
            .await
            .unwrap();
        let id = teacher.teacher.id;
        let service = TeacherService::new_lazy();

        let own = request(&storage, Some(user(id, UserRole::Teacher)));
        let resp = service.get_teacher(id, &own).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body["data"]["branches"][0]["years"][0]["subjects"],
            serde_json::json!(["Maths", "Physics"])
        );

        let other = request(&storage, Some(user(id + 100, UserRole::Teacher)));
        let resp = service.get_teacher(id, &other).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let admin = request(&storage, Some(user(id + 100, UserRole::Admin)));
        assert_eq!(
            service.get_teacher(id, &admin).await.unwrap().status(),
            StatusCode::OK
        );
        assert_eq!(
            service.get_teacher(id + 500, &admin).await.unwrap().status(),
            StatusCode::NOT_FOUND
        );
    }
}
