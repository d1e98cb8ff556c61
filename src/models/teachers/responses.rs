use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 教师列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 教师所授科目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherSubjectsResponse {
    pub subjects: Vec<String>,
}
