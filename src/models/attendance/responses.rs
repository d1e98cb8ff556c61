use super::entities::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use serde::Serialize;
use ts_rs::TS;

// 学生考勤响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}

// 考勤表条目（未标记时 status 为 null）
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetEntry {
    pub student_id: i64,
    pub register_number: String,
    pub name: String,
    pub status: Option<AttendanceStatus>,
}

// 考勤表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSheetResponse {
    pub date: chrono::NaiveDate,
    pub entries: Vec<AttendanceSheetEntry>,
}
