use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::BranchService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_branch(
    service: &BranchService,
    branch_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 学籍档案、教师分配、课程表随专业级联删除
    match storage.delete_branch(branch_id).await {
        Ok(true) => {
            info!("Branch {} deleted", branch_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Branch deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BranchNotFound,
            "Branch not found",
        ))),
        Err(e) => Ok(internal_error("Branch deletion failed", e)),
    }
}
