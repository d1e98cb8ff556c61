//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_uni_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum UniError {
            $($variant(String),)*
        }

        impl UniError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(UniError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(UniError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(UniError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl UniError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        UniError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_uni_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
}

impl UniError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（SQLite / PostgreSQL / MySQL 的报错文本各不相同）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        matches!(self, UniError::Conflict(_))
            || msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for UniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for UniError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for UniError {
    fn from(err: sea_orm::DbErr) -> Self {
        UniError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for UniError {
    fn from(err: std::io::Error) -> Self {
        UniError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for UniError {
    fn from(err: serde_json::Error) -> Self {
        UniError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for UniError {
    fn from(err: chrono::ParseError) -> Self {
        UniError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UniError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(UniError::cache_connection("test").code(), "E001");
        assert_eq!(UniError::database_config("test").code(), "E003");
        assert_eq!(UniError::validation("test").code(), "E006");
        assert_eq!(UniError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            UniError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(UniError::conflict("test").error_type(), "Resource Conflict");
    }

    #[test]
    fn test_format_simple() {
        let err = UniError::validation("Year must be between 1 and 4");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Year must be between 1 and 4"));
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(
            UniError::database_operation("UNIQUE constraint failed: users.email")
                .is_unique_violation()
        );
        assert!(
            UniError::database_operation(
                "duplicate key value violates unique constraint \"users_email_key\""
            )
            .is_unique_violation()
        );
        assert!(UniError::conflict("already exists").is_unique_violation());
        assert!(!UniError::database_operation("connection reset").is_unique_violation());
    }
}
