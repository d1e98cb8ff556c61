use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 验证 refresh token 并生成新的 access token
    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            Ok(HttpResponse::Unauthorized()
                .cookie(empty_cookie)
                .json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                )))
        }
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::{JwtUtils, REFRESH_TOKEN_COOKIE};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_refresh_with_valid_cookie() {
        let pair = JwtUtils::generate_token_pair(3, "student").unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, pair.refresh_token))
            .to_http_request();

        let resp = AuthService::new_lazy().refresh_token(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token_and_missing_cookie() {
        let pair = JwtUtils::generate_token_pair(3, "student").unwrap();
        let req = TestRequest::default()
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, pair.access_token))
            .to_http_request();
        let resp = AuthService::new_lazy().refresh_token(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        // 无效 cookie 会被清除
        assert!(resp.cookies().any(|c| c.name() == REFRESH_TOKEN_COOKIE));

        let req = TestRequest::default().to_http_request();
        let resp = AuthService::new_lazy().refresh_token(&req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
