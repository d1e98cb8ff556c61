pub mod admin;
pub mod auth;
pub mod student;
pub mod teacher;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use student::configure_student_routes;
pub use teacher::configure_teacher_routes;

use actix_web::{HttpResponse, web};

pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to Student Portal API")
}

pub fn configure_root_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(welcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::memory_storage;
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;
    use crate::utils::password::hash_password;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_student_session_and_role_gates() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let mut student = student_request("21CS001", cse.id, 1);
        student.password = hash_password("pam@123").unwrap();
        let student = storage.create_student(student).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_root_routes)
                .configure(configure_auth_routes)
                .configure(configure_admin_routes)
                .configure(configure_teacher_routes)
                .configure(configure_student_routes),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(
            test::read_body(resp).await,
            web::Bytes::from_static(b"Welcome to Student Portal API")
        );

        let login = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "21cs001@uni.edu",
                "password": "pam@123",
                "role": "student"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, login).await;
        let token = body["data"]["accessToken"].as_str().unwrap().to_string();
        let bearer = ("Authorization", format!("Bearer {token}"));

        let me = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer.clone())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, me).await;
        assert_eq!(body["data"]["user"]["id"], student.id);

        let cases = [
            (test::TestRequest::get().uri("/api/admin/branches"), StatusCode::OK),
            (test::TestRequest::post().uri("/api/admin/branches"), StatusCode::FORBIDDEN),
            (
                test::TestRequest::get().uri("/api/teacher/students?branchId=1&year=1"),
                StatusCode::FORBIDDEN,
            ),
            (
                test::TestRequest::get().uri(&format!("/api/student/marks/{}", student.id)),
                StatusCode::OK,
            ),
        ];
        for (req, expected) in cases {
            let resp = test::call_service(&app, req.insert_header(bearer.clone()).to_request()).await;
            assert_eq!(resp.status(), expected);
        }

        let anonymous = test::TestRequest::get()
            .uri(&format!("/api/student/marks/{}", student.id))
            .to_request();
        let resp = test::call_service(&app, anonymous).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
