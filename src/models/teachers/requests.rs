use serde::Deserialize;
use ts_rs::TS;

use crate::models::branches::entities::BranchYear;
use crate::models::common::flexible::deserialize_optional_i64;

// 添加教师时的某个专业及其年级、科目
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherBranchInput {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub years: Vec<BranchYear>,
}

// 管理员添加教师（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct AddTeacherRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub branches: Vec<TeacherBranchInput>,
}

// 单条授课分配（存储层使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub branch_id: i64,
    pub year: i32,
    pub subject: String,
}

// 创建教师（存储层使用，password 为已哈希的密码）
#[derive(Debug, Clone)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub assignments: Vec<NewAssignment>,
}

// 教师列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

// 查询教师在某专业某年级所授科目
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherSubjectsQuery {
    pub teacher_id: i64,
    pub branch_id: i64,
    pub year: i32,
}
