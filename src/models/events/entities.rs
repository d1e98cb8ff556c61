use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 校园活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "event.ts")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub url: String,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
