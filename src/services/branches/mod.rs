pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::branches::requests::{CreateBranchRequest, UpdateBranchRequest};
use crate::storage::Storage;

pub struct BranchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BranchService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取专业列表
    pub async fn list_branches(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_branches(self, request).await
    }

    // 创建专业
    pub async fn create_branch(
        &self,
        branch_data: CreateBranchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_branch(self, branch_data, request).await
    }

    // 更新专业
    pub async fn update_branch(
        &self,
        branch_id: i64,
        update_data: UpdateBranchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_branch(self, branch_id, update_data, request).await
    }

    // 删除专业
    pub async fn delete_branch(
        &self,
        branch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_branch(self, branch_id, request).await
    }
}

/// 专业名称：去除首尾空白，1..=100 个字符
pub(crate) fn normalize_branch_name(name: &str) -> Result<String, &'static str> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > 100 {
        return Err("Branch name must be between 1 and 100 characters");
    }
    Ok(name.to_string())
}
