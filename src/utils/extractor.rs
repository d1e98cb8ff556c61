//! 路径参数提取器
//!
//! 非法的路径参数返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode,
};
use futures_util::future::{Ready, ready};
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Debug)]
pub struct InvalidPathParam {
    name: &'static str,
}

impl fmt::Display for InvalidPathParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid path parameter: {}", self.name)
    }
}

impl ResponseError for InvalidPathParam {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            self.to_string(),
        ))
    }
}

/// 正整数 ID 路径参数（`{id}`）
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = InvalidPathParam;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req.match_info().get("id")).map(SafeIDI64))
    }
}

fn parse_positive_id(raw: Option<&str>) -> Result<i64, InvalidPathParam> {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or(InvalidPathParam { name: "id" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("42")).unwrap(), 42);
        assert!(parse_positive_id(Some("0")).is_err());
        assert!(parse_positive_id(Some("-1")).is_err());
        assert!(parse_positive_id(Some("abc")).is_err());
        assert!(parse_positive_id(None).is_err());
    }
}
