use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::flexible::deserialize_optional_i64;

// 管理员添加学生（来自HTTP请求，字段均为必填，由服务层校验）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct AddStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub register_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub branch_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub year: Option<i64>,
}

// 创建学生（存储层使用，password 为已哈希的密码）
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub register_number: String,
    pub branch_id: i64,
    pub year: i32,
}

// 更新学生请求（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub register_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub branch_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[ts(type = "number | string | null")]
    pub year: Option<i64>,
}

// 更新学生（存储层使用，已校验、已哈希）
#[derive(Debug, Clone, Default)]
pub struct UpdateStudentRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub register_number: Option<String>,
    pub branch_id: Option<i64>,
    pub year: Option<i32>,
}

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub branch_id: Option<i64>,
    pub year: Option<i32>,
    pub search: Option<String>,
}

// 按专业、年级查询学生（教师端）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct ClassStudentsQuery {
    pub branch_id: i64,
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_student_accepts_form_strings() {
        let req: AddStudentRequest = serde_json::from_str(
            r#"{
                "name": "Gibbs",
                "registerNumber": "21CS001",
                "email": "gibbs@gmail.com",
                "password": "gibbs@123",
                "branchId": "3",
                "year": "2"
            }"#,
        )
        .unwrap();
        assert_eq!(req.register_number, "21CS001");
        assert_eq!(req.branch_id, Some(3));
        assert_eq!(req.year, Some(2));
    }

    #[test]
    fn test_add_student_missing_fields_default() {
        let req: AddStudentRequest =
            serde_json::from_str(r#"{"name": "Gibbs", "branchId": "", "year": null}"#).unwrap();
        assert!(req.email.is_empty());
        assert_eq!(req.branch_id, None);
        assert_eq!(req.year, None);
    }
}
