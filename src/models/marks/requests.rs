use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::flexible::deserialize_optional_i64;

// 单条成绩录入（来自HTTP请求，请求体为该结构的数组）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "mark.ts")]
pub struct AssignMarkEntry {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub subject: String,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub marks: Option<i64>,
}

// 写入成绩（存储层使用，按 学生 + 科目 + 年级 覆盖）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertMarkRequest {
    pub student_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub year: i32,
    pub marks: i32,
}
