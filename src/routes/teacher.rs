use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::attendance::requests::{AttendanceSheetQuery, UpdateAttendanceRequest};
use crate::models::marks::requests::AssignMarkEntry;
use crate::models::students::requests::ClassStudentsQuery;
use crate::models::teachers::requests::TeacherSubjectsQuery;
use crate::models::users::entities::UserRole;
use crate::services::{AttendanceService, MarkService, TeacherService};
use crate::utils::SafeIDI64;

static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn get_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(teacher_id.0, &req).await
}

pub async fn get_subjects(
    req: HttpRequest,
    query: web::Query<TeacherSubjectsQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_subjects(query.into_inner(), &req).await
}

pub async fn list_class_students(
    req: HttpRequest,
    query: web::Query<ClassStudentsQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_class_students(query.into_inner(), &req)
        .await
}

pub async fn assign_marks(
    req: HttpRequest,
    entries: web::Json<Vec<AssignMarkEntry>>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.assign_marks(entries.into_inner(), &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(update_data.into_inner(), &req)
        .await
}

pub async fn attendance_sheet(
    req: HttpRequest,
    query: web::Query<AttendanceSheetQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_sheet(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teacher")
            .wrap(RequireRole::new_any(UserRole::staff_roles()))
            .wrap(RequireJWT) // 最后 wrap 的最先执行
            .route("/get/{id}", web::get().to(get_teacher))
            .route("/get-subjects", web::get().to(get_subjects))
            .route("/students", web::get().to(list_class_students))
            .route("/assign-marks", web::post().to(assign_marks))
            .route("/update-attendance", web::post().to(update_attendance))
            .route("/attendance", web::get().to(attendance_sheet)),
    );
}
