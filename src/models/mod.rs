//! 数据模型定义
//!
//! `entities` 为业务实体，`requests` 为请求体/查询参数，`responses` 为响应体。

pub mod attendance;
pub mod auth;
pub mod branches;
pub mod common;
pub mod events;
pub mod marks;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::*;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误，2xxx 认证，3xxx 用户，4xxx 专业，
/// 5xxx 学生，6xxx 教师，7xxx 成绩，8xxx 考勤，9xxx 活动。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    InternalServerError = 1005,
    ValidationFailed = 1006,
    RateLimitExceeded = 1029,

    AuthFailed = 2000,

    UserAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,

    BranchNotFound = 4000,
    BranchAlreadyExists = 4001,
    BranchInvalid = 4002,

    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,

    TeacherNotFound = 6000,
    TeacherAssignmentInvalid = 6001,
    TeacherNotAssigned = 6002,

    MarksInvalid = 7000,

    AttendanceInvalid = 8000,

    EventNotFound = 9000,
    EventInvalid = 9001,
}
