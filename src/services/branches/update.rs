use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BranchService, normalize_branch_name};
use crate::models::{
    ApiResponse, ErrorCode,
    branches::{entities::normalize_years, requests::UpdateBranchRequest},
};
use crate::services::internal_error;

pub async fn update_branch(
    service: &BranchService,
    branch_id: i64,
    update_data: UpdateBranchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let branch_name = match update_data.branch_name.as_deref().map(normalize_branch_name) {
        Some(Ok(name)) => Some(name),
        Some(Err(msg)) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BranchInvalid, msg)));
        }
        None => None,
    };

    let years = match update_data.years.map(normalize_years) {
        Some(Ok(years)) => Some(years),
        Some(Err(msg)) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BranchInvalid, msg)));
        }
        None => None,
    };

    let storage = service.get_storage(request)?;

    match storage
        .update_branch(branch_id, UpdateBranchRequest { branch_name, years })
        .await
    {
        Ok(Some(branch)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(branch, "Branch updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BranchNotFound,
            "Branch not found",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::BranchAlreadyExists, "Branch already exists"),
        )),
        Err(e) => Ok(internal_error("Branch update failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::branches::entities::BranchYear;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_update_replaces_years() {
        let storage = memory_storage().await;
        let branch = storage.create_branch(branch_request("CSE")).await.unwrap();
        let req = request(&storage, None);

        let resp = BranchService::new_lazy()
            .update_branch(
                branch.id,
                UpdateBranchRequest {
                    branch_name: None,
                    years: Some(vec![BranchYear {
                        year: 3,
                        subjects: vec!["Compilers".to_string()],
                    }]),
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["branchName"], "CSE");
        assert_eq!(body["data"]["years"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["years"][0]["year"], 3);
    }

    #[actix_web::test]
    async fn test_update_unknown_branch() {
        let storage = memory_storage().await;
        let req = request(&storage, None);
        let resp = BranchService::new_lazy()
            .update_branch(
                404,
                UpdateBranchRequest {
                    branch_name: Some("ME".to_string()),
                    years: None,
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
