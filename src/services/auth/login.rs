use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::internal_error;
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

// 邮箱不存在、密码错误、身份不符统一使用同一提示
const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        INVALID_CREDENTIALS,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let email = login_request.email.trim().to_lowercase();
    if email.is_empty() || login_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Email and password are required",
        )));
    }

    // 1. 根据邮箱获取用户，校验身份与密码
    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user))
            if user.role == login_request.role
                && verify_password(&login_request.password, &user.password_hash) =>
        {
            user
        }
        Ok(_) => {
            info!("Rejected login for {} as {}", email, login_request.role);
            return Ok(invalid_credentials());
        }
        Err(e) => return Ok(internal_error("Login failed", e)),
    };

    // 2. 停用账号不允许登录
    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Account is disabled",
        )));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => return Ok(internal_error("Login failed, unable to generate token", e)),
    };

    info!("User {} logged in as {}", user.id, user.role);

    let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
