use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::flexible::deserialize_optional_i64;

// 标记考勤（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct UpdateAttendanceRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub date: String,
    pub status: AttendanceStatus,
}

// 写入考勤（存储层使用，按 学生 + 日期 覆盖）
#[derive(Debug, Clone)]
pub struct UpsertAttendanceRequest {
    pub student_id: i64,
    pub marked_by: i64,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
}

// 查询某专业某年级某天的考勤表
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetQuery {
    pub branch_id: i64,
    pub year: i32,
    pub date: String,
}
