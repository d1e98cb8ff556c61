use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{Result, UniError};

// 发布活动（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "event.ts")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub url: String,
}

// 写入活动（存储层使用）
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub url: String,
    pub created_by: i64,
}

impl CreateEventRequest {
    /// 校验并转换为存储层请求
    pub fn into_new_event(self, created_by: i64) -> Result<NewEvent> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let url = self.url.trim().to_string();

        if title.is_empty() || description.is_empty() || url.is_empty() || self.date.is_empty() {
            return Err(UniError::validation("All fields are required!"));
        }
        if title.chars().count() > 200 {
            return Err(UniError::validation("Title must be at most 200 characters"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(UniError::validation(
                "Url must start with http:// or https://",
            ));
        }

        Ok(NewEvent {
            title,
            description,
            date: parse_event_date(&self.date)?,
            url,
            created_by,
        })
    }
}

/// 解析活动时间：RFC 3339 时间戳，或 `YYYY-MM-DD`（当天 00:00 UTC）
pub fn parse_event_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| UniError::date_parse(format!("Invalid event date: {input}")))
}
