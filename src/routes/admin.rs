use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::branches::requests::{CreateBranchRequest, UpdateBranchRequest};
use crate::models::events::requests::CreateEventRequest;
use crate::models::students::requests::{
    AddStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::models::teachers::requests::{AddTeacherRequest, TeacherListQuery};
use crate::models::users::entities::UserRole;
use crate::services::{BranchService, EventService, StudentService, TeacherService};
use crate::utils::SafeIDI64;

static BRANCH_SERVICE: Lazy<BranchService> = Lazy::new(BranchService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

// 专业
pub async fn list_branches(req: HttpRequest) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE.list_branches(&req).await
}

pub async fn create_branch(
    req: HttpRequest,
    branch_data: web::Json<CreateBranchRequest>,
) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE
        .create_branch(branch_data.into_inner(), &req)
        .await
}

pub async fn update_branch(
    req: HttpRequest,
    branch_id: SafeIDI64,
    update_data: web::Json<UpdateBranchRequest>,
) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE
        .update_branch(branch_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_branch(req: HttpRequest, branch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BRANCH_SERVICE.delete_branch(branch_id.0, &req).await
}

// 学生
pub async fn add_student(
    req: HttpRequest,
    student_data: web::Json<AddStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .add_student(student_data.into_inner(), &req)
        .await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(student_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(student_id.0, &req).await
}

// 教师
pub async fn add_teacher(
    req: HttpRequest,
    teacher_data: web::Json<AddTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .add_teacher(teacher_data.into_inner(), &req)
        .await
}

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn delete_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(teacher_id.0, &req).await
}

// 活动
pub async fn list_events(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req).await
}

pub async fn create_event(
    req: HttpRequest,
    event_data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(event_data.into_inner(), &req).await
}

pub async fn delete_event(req: HttpRequest, event_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(event_id.0, &req).await
}

fn admin_only() -> RequireRole {
    RequireRole::new(&UserRole::Admin)
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(RequireJWT)
            .service(
                // 专业列表对所有登录用户开放，修改仅限管理员
                web::resource("/branches")
                    .route(web::get().to(list_branches))
                    .route(web::post().to(create_branch).wrap(admin_only())),
            )
            .service(
                web::resource("/branches/{id}")
                    .wrap(admin_only())
                    .route(web::put().to(update_branch))
                    .route(web::delete().to(delete_branch)),
            )
            .service(
                web::resource("/add-student")
                    .wrap(admin_only())
                    .route(web::post().to(add_student)),
            )
            .service(
                web::resource("/students")
                    .wrap(admin_only())
                    .route(web::get().to(list_students)),
            )
            .service(
                web::resource("/students/{id}")
                    .wrap(admin_only())
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .service(
                web::resource("/add-teacher")
                    .wrap(admin_only())
                    .route(web::post().to(add_teacher)),
            )
            .service(
                web::resource("/teachers")
                    .wrap(admin_only())
                    .route(web::get().to(list_teachers)),
            )
            .service(
                web::resource("/teachers/{id}")
                    .wrap(admin_only())
                    .route(web::delete().to(delete_teacher)),
            )
            .service(
                // 活动列表对所有登录用户开放
                web::resource("/events")
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event).wrap(admin_only())),
            )
            .service(
                web::resource("/events/{id}")
                    .wrap(admin_only())
                    .route(web::delete().to(delete_event)),
            ),
    );
}
