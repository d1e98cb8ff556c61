use serde::Deserialize;
use ts_rs::TS;

use super::entities::BranchYear;

// 创建专业请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "branch.ts")]
pub struct CreateBranchRequest {
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub years: Vec<BranchYear>,
}

// 更新专业请求；years 给出时整体替换课程表
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "branch.ts")]
pub struct UpdateBranchRequest {
    pub branch_name: Option<String>,
    pub years: Option<Vec<BranchYear>>,
}
