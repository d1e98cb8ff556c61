pub mod attendance;
pub mod auth;
pub mod branches;
pub mod events;
pub mod marks;
pub mod students;
pub mod teachers;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use branches::BranchService;
pub use events::EventService;
pub use marks::MarkService;
pub use students::StudentService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not configured")
        })
}

/// 取当前登录用户，未登录时给出 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 学生本人或教职工才能访问某个学生的数据
pub(crate) fn can_access_student(user: &User, student_id: i64) -> bool {
    user.role.is_staff() || user.id == student_id
}

/// 403 响应
pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

/// 500 响应，同时记录错误日志
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{context}: {err}");
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use test_support::user;

    #[test]
    fn test_student_access_rule() {
        assert!(can_access_student(&user(5, UserRole::Student), 5));
        assert!(!can_access_student(&user(5, UserRole::Student), 6));
        assert!(can_access_student(&user(9, UserRole::Teacher), 6));
        assert!(can_access_student(&user(1, UserRole::Admin), 6));
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let storage = test_support::memory_storage().await;
        let req = test_support::request(&storage, None);
        let resp = current_user(&req).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
