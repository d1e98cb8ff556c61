use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{BranchService, normalize_branch_name};
use crate::models::{
    ApiResponse, ErrorCode,
    branches::{entities::normalize_years, requests::CreateBranchRequest},
};
use crate::services::internal_error;

pub async fn create_branch(
    service: &BranchService,
    branch_data: CreateBranchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let branch_name = match normalize_branch_name(&branch_data.branch_name) {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BranchInvalid, msg)));
        }
    };

    let years = match normalize_years(branch_data.years) {
        Ok(years) => years,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BranchInvalid, msg)));
        }
    };

    let storage = service.get_storage(request)?;

    match storage
        .create_branch(CreateBranchRequest { branch_name, years })
        .await
    {
        Ok(branch) => {
            info!("Branch {} created", branch.branch_name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(branch, "Branch created successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::BranchAlreadyExists, "Branch already exists"),
        )),
        Err(e) => Ok(internal_error("Branch creation failed", e)),
    }
}
