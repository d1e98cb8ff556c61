use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, students::requests::ClassStudentsQuery};
use crate::services::internal_error;

pub async fn list_class_students(
    service: &TeacherService,
    query: ClassStudentsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_students_by_class(query.branch_id, query.year)
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            students,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve students", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, memory_storage, request};
    use crate::storage::sea_orm_storage::branches::tests::branch_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[actix_web::test]
    async fn test_students_ordered_by_register_number() {
        let storage = memory_storage().await;
        let cse = storage.create_branch(branch_request("CSE")).await.unwrap();
        for number in ["21CS003", "21CS001", "21CS002"] {
            storage
                .create_student(student_request(number, cse.id, 1))
                .await
                .unwrap();
        }
        storage
            .create_student(student_request("20CS001", cse.id, 2))
            .await
            .unwrap();
        let req = request(&storage, None);

        let resp = TeacherService::new_lazy()
            .list_class_students(
                ClassStudentsQuery {
                    branch_id: cse.id,
                    year: 1,
                },
                &req,
            )
            .await
            .unwrap();
        let body = body_json(resp).await;
        let numbers: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["registerNumber"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, vec!["21CS001", "21CS002", "21CS003"]);
    }
}
