use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use crate::models::{ApiResponse, ErrorCode, events::requests::CreateEventRequest};
use crate::services::{current_user, internal_error};

pub async fn create_event(
    service: &EventService,
    event_data: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let new_event = match event_data.into_new_event(user.id) {
        Ok(event) => event,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::EventInvalid, e.message())));
        }
    };

    let storage = service.get_storage(request)?;

    match storage.create_event(new_event).await {
        Ok(event) => {
            info!("Event {} created by user {}", event.id, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(event, "Event created successfully")))
        }
        Err(e) => Ok(internal_error("Event creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support::{body_json, memory_storage, request, user};
    use actix_web::http::StatusCode;

    fn event(title: &str, date: &str, url: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            description: "Annual technical festival".to_string(),
            date: date.to_string(),
            url: url.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_events_listed_by_date() {
        let storage = memory_storage().await;
        let admin = storage
            .create_user(CreateUserRequest {
                name: "Admin".to_string(),
                email: "admin@uni.edu".to_string(),
                password: "$argon2id$placeholder".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        let req = request(&storage, Some(user(admin.id, UserRole::Admin)));
        let service = EventService::new_lazy();

        let resp = service
            .create_event(event("Hackathon", "2024-11-20", "https://hack.uni.edu"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        service
            .create_event(
                event("Tech Fest", "2024-10-01T10:00:00Z", "https://fest.uni.edu"),
                &req,
            )
            .await
            .unwrap();

        let body = body_json(service.list_events(&req).await.unwrap()).await;
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Tech Fest", "Hackathon"]);
    }

    #[actix_web::test]
    async fn test_create_event_validation() {
        let storage = memory_storage().await;
        let req = request(&storage, Some(user(1, UserRole::Admin)));
        let service = EventService::new_lazy();

        let resp = service
            .create_event(event("Hackathon", "2024-11-20", "ftp://hack.uni.edu"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .create_event(event("", "2024-11-20", "https://hack.uni.edu"), &req)
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["message"], "All fields are required!");
    }
}
