pub mod list;
pub mod sheet;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{AttendanceSheetQuery, UpdateAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 标记考勤
    pub async fn update_attendance(
        &self,
        update_data: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, update_data, request).await
    }

    // 获取学生考勤及统计
    pub async fn list_student_attendance(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_student_attendance(self, student_id, request).await
    }

    // 获取某专业某年级某天的考勤表
    pub async fn attendance_sheet(
        &self,
        query: AttendanceSheetQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sheet::attendance_sheet(self, query, request).await
    }
}
