use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::services::{AttendanceService, MarkService};
use crate::utils::SafeIDI64;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// 学生本人或教职工可访问，由服务层判断
pub async fn list_marks(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_student_marks(student_id.0, &req).await
}

pub async fn list_attendance(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_student_attendance(student_id.0, &req)
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/student")
            .wrap(RequireJWT)
            .route("/marks/{id}", web::get().to(list_marks))
            .route("/attendance/{id}", web::get().to(list_attendance)),
    );
}
