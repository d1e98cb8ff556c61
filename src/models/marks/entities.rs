use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_MARKS: i32 = 0;
pub const MAX_MARKS: i32 = 100;
/// 及格线
pub const PASS_MARKS: i32 = 50;

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "mark.ts")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    /// 录入教师（教师被删除后为 null）
    pub teacher_id: Option<i64>,
    pub subject: String,
    pub year: i32,
    pub marks: i32,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生端成绩条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct StudentMark {
    pub subject: String,
    pub year: i32,
    pub marks: i32,
    pub passed: bool,
}

impl From<Mark> for StudentMark {
    fn from(mark: Mark) -> Self {
        Self {
            passed: mark.marks >= PASS_MARKS,
            subject: mark.subject,
            year: mark.year,
            marks: mark.marks,
        }
    }
}
