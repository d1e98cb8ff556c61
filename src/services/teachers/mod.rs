pub mod class_students;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::ClassStudentsQuery;
use crate::models::teachers::requests::{AddTeacherRequest, TeacherListQuery, TeacherSubjectsQuery};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 添加教师
    pub async fn add_teacher(
        &self,
        teacher_data: AddTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_teacher(self, teacher_data, request).await
    }

    // 获取教师详情
    pub async fn get_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_teacher(self, teacher_id, request).await
    }

    // 获取教师列表
    pub async fn list_teachers(
        &self,
        query: TeacherListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, query, request).await
    }

    // 获取教师在某专业某年级所授科目
    pub async fn get_subjects(
        &self,
        query: TeacherSubjectsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::get_subjects(self, query, request).await
    }

    // 获取某专业某年级的学生
    pub async fn list_class_students(
        &self,
        query: ClassStudentsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        class_students::list_class_students(self, query, request).await
    }

    // 删除教师
    pub async fn delete_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, teacher_id, request).await
    }
}
