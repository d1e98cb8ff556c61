use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::branches::entities::{MAX_YEAR, MIN_YEAR};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static REGISTER_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]+$").expect("Invalid register number regex"));

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 128;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.chars().count();
    if len == 0 || len > 100 {
        return Err("Name must be between 1 and 100 characters");
    }
    Ok(())
}

pub fn validate_register_number(register_number: &str) -> Result<(), &'static str> {
    if register_number.len() > 32 {
        return Err("Register number must be at most 32 characters");
    }
    // 只能包含字母、数字、斜杠或连字符
    if !REGISTER_NUMBER_RE.is_match(register_number) {
        return Err("Register number must contain only letters, digits, '/' or '-'");
    }
    Ok(())
}

/// 年级校验，返回转换后的 i32
pub fn validate_year(year: i64) -> Result<i32, String> {
    if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
        return Err(format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"));
    }
    Ok(year as i32)
}

/// 密码长度校验（账号由管理员创建，只限制长度）
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(format!(
            "Password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("gibbs@gmail.com").is_ok());
        assert!(validate_email("first.last+tag@uni.ac.in").is_ok());
        assert!(validate_email("gibbs@gmail").is_err());
        assert!(validate_email("gibbs.gmail.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_register_number() {
        assert!(validate_register_number("21CS001").is_ok());
        assert!(validate_register_number("2021/CSE-14").is_ok());
        assert!(validate_register_number("21 CS 001").is_err());
        assert!(validate_register_number(&"9".repeat(33)).is_err());
    }

    #[test]
    fn test_year() {
        assert_eq!(validate_year(1), Ok(1));
        assert_eq!(validate_year(4), Ok(4));
        assert!(validate_year(0).is_err());
        assert!(validate_year(5).is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("gibbs@123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Gibbs").is_ok());
        assert!(validate_name("").is_err());
    }
}
