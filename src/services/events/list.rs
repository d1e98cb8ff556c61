use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_events().await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Event list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve event list", e)),
    }
}
