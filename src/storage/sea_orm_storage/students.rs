use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::branches::{Column as BranchColumn, Entity as Branches};
use crate::entity::student_profiles::{
    ActiveModel, Column, Entity as StudentProfiles, Model as StudentProfileModel, Relation,
};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users,
};
use crate::errors::{Result, UniError};
use crate::models::{
    PaginationInfo, normalize_page,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRecord},
        responses::StudentListResponse,
    },
    users::entities::{UserRole, UserStatus},
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 将学籍档案与用户、专业信息组装为学生实体，保持档案顺序
    async fn assemble_students(&self, profiles: Vec<StudentProfileModel>) -> Result<Vec<Student>> {
        if profiles.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id).collect();
        let mut branch_ids: Vec<i64> = profiles.iter().map(|p| p.branch_id).collect();
        branch_ids.sort_unstable();
        branch_ids.dedup();

        let mut users: HashMap<i64, _> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let branch_names: HashMap<i64, String> = Branches::find()
            .filter(BranchColumn::Id.is_in(branch_ids))
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业失败: {e}")))?
            .into_iter()
            .map(|b| (b.id, b.branch_name))
            .collect();

        Ok(profiles
            .into_iter()
            .filter_map(|profile| {
                let user = users.remove(&profile.user_id)?;
                let branch_name = branch_names
                    .get(&profile.branch_id)
                    .cloned()
                    .unwrap_or_default();
                Some(profile.into_student(user, branch_name))
            })
            .collect())
    }

    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let user = UserActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(UserRole::Student.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| UniError::database_operation(format!("创建学生用户失败: {e}")))?;

        ActiveModel {
            user_id: Set(user.id),
            register_number: Set(req.register_number),
            branch_id: Set(req.branch_id),
            year: Set(req.year),
        }
        .insert(&txn)
        .await
        .map_err(|e| UniError::database_operation(format!("创建学籍档案失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_student_by_id_impl(user.id)
            .await?
            .ok_or_else(|| UniError::not_found(format!("Student {} not found", user.id)))
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let profile = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学籍档案失败: {e}")))?;

        match profile {
            Some(profile) => Ok(self.assemble_students(vec![profile]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 通过学号获取学生
    pub async fn get_student_by_register_number_impl(
        &self,
        register_number: &str,
    ) -> Result<Option<Student>> {
        let profile = StudentProfiles::find()
            .filter(Column::RegisterNumber.eq(register_number))
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学籍档案失败: {e}")))?;

        match profile {
            Some(profile) => Ok(self.assemble_students(vec![profile]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = StudentProfiles::find();

        if let Some(branch_id) = query.branch_id {
            select = select.filter(Column::BranchId.eq(branch_id));
        }

        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }

        // 搜索姓名、邮箱或学号
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.join(JoinType::InnerJoin, Relation::User.def()).filter(
                Condition::any()
                    .add(UserColumn::Name.like(pattern.clone()))
                    .add(UserColumn::Email.like(pattern.clone()))
                    .add(Column::RegisterNumber.like(pattern)),
            );
        }

        select = select.order_by_asc(Column::RegisterNumber);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生页数失败: {e}")))?;

        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: self.assemble_students(profiles).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出某专业某年级的学生，按学号排序
    pub async fn list_students_by_class_impl(
        &self,
        branch_id: i64,
        year: i32,
    ) -> Result<Vec<Student>> {
        let profiles = StudentProfiles::find()
            .filter(Column::BranchId.eq(branch_id))
            .filter(Column::Year.eq(year))
            .order_by_asc(Column::RegisterNumber)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询班级学生失败: {e}")))?;

        self.assemble_students(profiles).await
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRecord,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let mut user = UserActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(name) = update.name {
            user.name = Set(name);
        }
        if let Some(email) = update.email {
            user.email = Set(email);
        }
        if let Some(password) = update.password {
            user.password_hash = Set(password);
        }
        user.update(&txn)
            .await
            .map_err(|e| UniError::database_operation(format!("更新学生用户失败: {e}")))?;

        if update.register_number.is_some() || update.branch_id.is_some() || update.year.is_some()
        {
            let mut profile = ActiveModel {
                user_id: sea_orm::ActiveValue::Unchanged(id),
                ..Default::default()
            };
            if let Some(register_number) = update.register_number {
                profile.register_number = Set(register_number);
            }
            if let Some(branch_id) = update.branch_id {
                profile.branch_id = Set(branch_id);
            }
            if let Some(year) = update.year {
                profile.year = Set(year);
            }
            profile
                .update(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("更新学籍档案失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生（级联删除学籍档案、成绩与考勤）
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let profile = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学籍档案失败: {e}")))?;
        if profile.is_none() {
            return Ok(false);
        }

        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::branches::tests::branch_request;

    pub(crate) fn student_request(
        register_number: &str,
        branch_id: i64,
        year: i32,
    ) -> CreateStudentRequest {
        CreateStudentRequest {
            name: format!("Student {register_number}"),
            email: format!("{}@uni.edu", register_number.to_lowercase()),
            password: "$argon2id$placeholder".to_string(),
            register_number: register_number.to_string(),
            branch_id,
            year,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_student() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();

        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 2))
            .await
            .unwrap();
        assert_eq!(student.branch_name, "Computer Science");
        assert_eq!(student.year, 2);

        let user = storage.get_user_by_id_impl(student.id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Student);

        let by_number = storage
            .get_student_by_register_number_impl("21CS001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_number.id, student.id);
    }

    #[tokio::test]
    async fn test_duplicate_register_number_rolls_back_user() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();

        let mut duplicate = student_request("21CS001", branch.id, 1);
        duplicate.email = "other@uni.edu".to_string();
        let err = storage.create_student_impl(duplicate).await.unwrap_err();
        assert!(err.is_unique_violation());

        // 事务回滚，用户记录不应残留
        assert!(
            storage
                .get_user_by_email_impl("other@uni.edu")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_class_listing_is_ordered_by_register_number() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        for number in ["21CS003", "21CS001", "21CS002"] {
            storage
                .create_student_impl(student_request(number, branch.id, 1))
                .await
                .unwrap();
        }
        storage
            .create_student_impl(student_request("20CS009", branch.id, 2))
            .await
            .unwrap();

        let numbers: Vec<String> = storage
            .list_students_by_class_impl(branch.id, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.register_number)
            .collect();
        assert_eq!(numbers, vec!["21CS001", "21CS002", "21CS003"]);

        assert!(
            storage
                .list_students_by_class_impl(branch.id, 4)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_paginated_search() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        for number in ["21CS001", "21CS002", "21ME001"] {
            storage
                .create_student_impl(student_request(number, branch.id, 1))
                .await
                .unwrap();
        }

        let result = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: Some(1),
                size: Some(1),
                search: Some("21CS".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 2);
        assert_eq!(result.pagination.total_pages, 2);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].register_number, "21CS001");
    }

    #[tokio::test]
    async fn test_update_and_delete_student() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();

        let updated = storage
            .update_student_impl(
                student.id,
                UpdateStudentRecord {
                    name: Some("Renamed".to_string()),
                    year: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.year, 2);
        assert_eq!(updated.register_number, "21CS001");

        assert!(storage.delete_student_impl(student.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(student.id).await.unwrap().is_none());
        assert!(!storage.delete_student_impl(student.id).await.unwrap());
    }
}
