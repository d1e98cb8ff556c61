/*!
 * 速率限制中间件
 *
 * 固定窗口计数：每个限制键在窗口开始时计数清零，窗口内超过上限返回 429。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 次数与窗口来自 rate_limit 配置
 *     .route(web::post().to(login))
 * ```
 *
 * - 已认证请求以用户 ID 作为限制键，否则使用客户端 IP
 * - 超过限制返回 429 Too Many Requests 与 Retry-After 头
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 全局速率限制计数
/// 键: 前缀:标识，值: (窗口内请求数, 窗口开始时间戳)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u32, i64)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600)) // 清理长期不活跃的键
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
}

impl RateLimit {
    /// 创建新的速率限制器
    ///
    /// # 参数
    /// - `max_requests`: 时间窗口内允许的最大请求数
    /// - `window_secs`: 时间窗口（秒）
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录端点限制，次数与窗口取自配置
    pub fn login() -> Self {
        let config = &AppConfig::get().rate_limit;
        Self::new(config.login_max_requests, config.login_window_secs).with_prefix("login")
    }

    /// 刷新令牌限制：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }
}

/// 计算本次请求后的计数
///
/// 返回 `Ok((count, window_start))` 表示放行，`Err(retry_after)` 表示超限，
/// retry_after 为距离窗口结束的秒数。
fn next_window(
    entry: Option<(u32, i64)>,
    now: i64,
    max_requests: u32,
    window_secs: u64,
) -> Result<(u32, i64), u64> {
    let window = window_secs as i64;
    match entry {
        Some((count, start)) if now - start < window => {
            if count >= max_requests {
                Err((start + window - now).max(1) as u64)
            } else {
                Ok((count + 1, start))
            }
        }
        // 无记录或窗口已过期，开始新窗口
        _ => Ok((1, now)),
    }
}

/// 从请求中提取客户端 IP
///
/// 安全注意事项：
/// - 如果服务部署在反向代理后面，需要在反向代理中配置正确的 X-Forwarded-For / X-Real-IP 头
/// - 此实现会验证 IP 格式，防止伪造的无效头导致问题
/// - 在不可信网络中直接暴露服务时，攻击者可能伪造转发头来绕过限制
fn extract_client_ip(req: &ServiceRequest) -> String {
    // 尝试从连接信息获取真实 IP（最可信）
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    // 如果连接信息有有效 IP，优先使用
    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // 从 X-Forwarded-For 头获取（用于反向代理场景）
    // 只取第一个 IP（最接近客户端的）
    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    // 从 X-Real-IP 头获取
    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    // 如果都没有有效 IP，使用连接信息的默认值
    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

/// 验证 IP 地址格式是否有效
fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 从请求中提取用户 ID（如果已认证）
fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    use crate::models::users::entities::User;
    req.extensions().get::<User>().map(|user| user.id)
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();

        Box::pin(async move {
            // 构建限制键
            let identifier = extract_user_id(&req)
                .map(|id| format!("user:{}", id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));

            let cache_key = if key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", key_prefix, identifier)
            };

            let now = chrono::Utc::now().timestamp();
            let entry = RATE_LIMIT_CACHE.get(&cache_key).await;

            let (count, window_start) = match next_window(entry, now, max_requests, window_secs)
            {
                Ok(next) => next,
                Err(retry_after) => {
                    warn!(
                        "Rate limit exceeded for key: {} (limit: {}/{}s)",
                        cache_key, max_requests, window_secs
                    );
                    return Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ));
                }
            };

            RATE_LIMIT_CACHE
                .insert(cache_key, (count, window_start))
                .await;

            req.extensions_mut().insert(RateLimitInfo {
                remaining: max_requests.saturating_sub(count),
                limit: max_requests,
                reset: (window_start + window_secs as i64 - now).max(0) as u64,
            });

            // 继续处理请求
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

/// 速率限制信息（可在响应中添加）
#[derive(Clone)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        let config = &AppConfig::get().rate_limit;
        assert_eq!(login.max_requests, config.login_max_requests);
        assert_eq!(login.window_secs, config.login_window_secs);
        assert_eq!(login.key_prefix, "login");

        let refresh = RateLimit::refresh_token();
        assert_eq!(refresh.max_requests, 10);
        assert_eq!(refresh.key_prefix, "refresh");
    }

    #[test]
    fn test_fixed_window() {
        // 新窗口
        assert_eq!(next_window(None, 1000, 2, 60), Ok((1, 1000)));
        // 窗口内递增
        assert_eq!(next_window(Some((1, 1000)), 1010, 2, 60), Ok((2, 1000)));
        // 达到上限，等待窗口结束
        assert_eq!(next_window(Some((2, 1000)), 1020, 2, 60), Err(40));
        // 窗口过期后重新计数
        assert_eq!(next_window(Some((2, 1000)), 1060, 2, 60), Ok((1, 1060)));
    }

    #[actix_web::test]
    async fn test_middleware_returns_429() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(1, 60).with_prefix("test_429"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let first = test::call_service(
            &app,
            test::TestRequest::post().uri("/limited").to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(
            &app,
            test::TestRequest::post().uri("/limited").to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("Retry-After"));
    }
}
