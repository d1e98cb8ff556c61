use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BranchService;
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn list_branches(
    service: &BranchService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_branches().await {
        Ok(branches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            branches,
            "Branch list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve branch list", e)),
    }
}
