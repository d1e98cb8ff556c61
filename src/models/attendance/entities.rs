use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{Result, UniError};

// 考勤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "Present";
    pub const ABSENT: &'static str = "Absent";
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "{}", AttendanceStatus::PRESENT),
            AttendanceStatus::Absent => write!(f, "{}", AttendanceStatus::ABSENT),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录（每个学生每天一条）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub marked_by: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考勤统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    /// 出勤率（百分比，保留两位小数）
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let total = records.len() as i64;
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count() as i64;
        let percentage = if total == 0 {
            0.0
        } else {
            (present as f64 * 10000.0 / total as f64).round() / 100.0
        };

        Self {
            total,
            present,
            absent: total - present,
            percentage,
        }
    }
}

/// 解析考勤日期
///
/// 接受 RFC 3339 时间戳（前端 `new Date()` 序列化的格式）或 `YYYY-MM-DD`，
/// 时间戳按 UTC 取日期。
pub fn parse_attendance_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UniError::validation("Date is required"));
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.naive_utc().date());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| {
        UniError::date_parse(format!(
            "Invalid date '{input}': {e}. Expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            student_id: 1,
            marked_by: Some(2),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_attendance_date("2025-03-14").unwrap(), expected);
        assert_eq!(
            parse_attendance_date("2025-03-14T09:30:00.000Z").unwrap(),
            expected
        );
        // 带时区偏移的时间戳按 UTC 取日期
        assert_eq!(
            parse_attendance_date("2025-03-15T01:00:00+05:30").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_attendance_date("").is_err());
        assert!(parse_attendance_date("14/03/2025").is_err());
        assert_eq!(
            parse_attendance_date("yesterday").unwrap_err().code(),
            "E010"
        );
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"Present\""
        );
        assert_eq!(
            "Absent".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Absent
        );
        assert!(serde_json::from_str::<AttendanceStatus>("\"Late\"").is_err());
    }

    #[test]
    fn test_summary() {
        let empty = AttendanceSummary::from_records(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.percentage, 0.0);

        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
            record(AttendanceStatus::Present),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.percentage, 66.67);
    }
}
