pub mod assign;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::AssignMarkEntry;
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 批量录入成绩
    pub async fn assign_marks(
        &self,
        entries: Vec<AssignMarkEntry>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_marks(self, entries, request).await
    }

    // 获取学生成绩
    pub async fn list_student_marks(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_student_marks(self, student_id, request).await
    }
}
