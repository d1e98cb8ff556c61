use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserStatus;

// 学生（用户 + 学籍档案）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub register_number: String,
    pub branch_id: i64,
    pub branch_name: String,
    pub year: i32,
    pub status: UserStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
