use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse,
    teachers::{requests::TeacherSubjectsQuery, responses::TeacherSubjectsResponse},
};
use crate::services::internal_error;

pub async fn get_subjects(
    service: &TeacherService,
    query: TeacherSubjectsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 没有分配时返回空列表
    match storage
        .list_teacher_subjects(query.teacher_id, query.branch_id, query.year)
        .await
    {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherSubjectsResponse { subjects },
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve subjects", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::teachers::tests::{assignment, teacher_request};

    #[actix_web::test]
    async fn test_subjects_for_class() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        let teacher = storage
            .create_teacher(teacher_request(
                "dwight@uni.edu",
                vec![assignment(cse.id, 1, "Physics"), assignment(cse.id, 2, "Data Structures")],
            ))
            .await
            .unwrap();
        let req = request(&storage, None);
        let service = TeacherService::new_lazy();

        let query = |year| TeacherSubjectsQuery {
            teacher_id: teacher.teacher.id,
            branch_id: cse.id,
            year,
        };

        let body = body_json(service.get_subjects(query(1), &req).await.unwrap()).await;
        assert_eq!(body["data"]["subjects"], serde_json::json!(["Physics"]));

        let body = body_json(service.get_subjects(query(3), &req).await.unwrap()).await;
        assert_eq!(body["data"]["subjects"], serde_json::json!([]));
    }
}
