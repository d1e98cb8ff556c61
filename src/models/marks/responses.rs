use super::entities::Mark;
use serde::Serialize;
use ts_rs::TS;

// 成绩录入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct AssignMarksResponse {
    pub assigned: usize,
    pub marks: Vec<Mark>,
}
