use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::branches::{Column as BranchColumn, Entity as Branches};
use crate::entity::teacher_assignments::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn,
    Entity as TeacherAssignments,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, UniError};
use crate::models::{
    PaginationInfo, normalize_page,
    teachers::{
        entities::{TeacherAssignment, TeacherDetail, group_assignments},
        requests::{CreateTeacherRequest, TeacherListQuery},
        responses::TeacherListResponse,
    },
    users::entities::{UserRole, UserStatus},
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<TeacherDetail> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let user = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(UserRole::Teacher.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| UniError::database_operation(format!("创建教师用户失败: {e}")))?;

        if !req.assignments.is_empty() {
            let rows = req
                .assignments
                .into_iter()
                .map(|a| AssignmentActiveModel {
                    teacher_id: Set(user.id),
                    branch_id: Set(a.branch_id),
                    year: Set(a.year),
                    subject: Set(a.subject),
                    ..Default::default()
                });
            TeacherAssignments::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("写入授课分配失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_teacher_by_id_impl(user.id)
            .await?
            .ok_or_else(|| UniError::not_found(format!("Teacher {} not found", user.id)))
    }

    /// 通过 ID 获取教师及其按专业聚合的授课信息
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<TeacherDetail>> {
        let teacher = Users::find_by_id(id)
            .filter(Column::Role.eq(UserRole::Teacher.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询教师失败: {e}")))?;

        let Some(teacher) = teacher else {
            return Ok(None);
        };

        let assignments = self.list_teacher_assignments_impl(id).await?;

        Ok(Some(TeacherDetail {
            teacher: teacher.into_user(),
            branches: group_assignments(&assignments),
        }))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find().filter(Column::Role.eq(UserRole::Teacher.to_string()));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(pattern.clone()))
                    .add(Column::Email.like(pattern)),
            );
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| UniError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| UniError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| UniError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出教师的授课分配（按录入顺序）
    pub async fn list_teacher_assignments_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<TeacherAssignment>> {
        let rows = TeacherAssignments::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询授课分配失败: {e}")))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut branch_ids: Vec<i64> = rows.iter().map(|r| r.branch_id).collect();
        branch_ids.sort_unstable();
        branch_ids.dedup();

        let branch_names: HashMap<i64, String> = Branches::find()
            .filter(BranchColumn::Id.is_in(branch_ids))
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业失败: {e}")))?
            .into_iter()
            .map(|b| (b.id, b.branch_name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let branch_name = branch_names.get(&row.branch_id).cloned().unwrap_or_default();
                row.into_assignment(branch_name)
            })
            .collect())
    }

    /// 列出教师在某专业某年级教授的科目
    pub async fn list_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        branch_id: i64,
        year: i32,
    ) -> Result<Vec<String>> {
        let rows = TeacherAssignments::find()
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .filter(AssignmentColumn::BranchId.eq(branch_id))
            .filter(AssignmentColumn::Year.eq(year))
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询教师科目失败: {e}")))?;

        Ok(rows.into_iter().map(|r| r.subject).collect())
    }

    /// 删除教师（级联删除授课分配，已录入的成绩与考勤保留）
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Role.eq(UserRole::Teacher.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::teachers::requests::NewAssignment;
    use crate::storage::sea_orm_storage::branches::tests::branch_request;

    pub(crate) fn teacher_request(
        email: &str,
        assignments: Vec<NewAssignment>,
    ) -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: "Michael Scott".to_string(),
            email: email.to_string(),
            password: "$argon2id$placeholder".to_string(),
            assignments,
        }
    }

    pub(crate) fn assignment(branch_id: i64, year: i32, subject: &str) -> NewAssignment {
        NewAssignment {
            branch_id,
            year,
            subject: subject.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_teacher_groups_assignments() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let cs = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();

        let teacher = storage
            .create_teacher_impl(teacher_request(
                "michael@uni.edu",
                vec![
                    assignment(cs.id, 2, "Data Structures"),
                    assignment(cs.id, 1, "Maths"),
                    assignment(cs.id, 1, "Physics"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(teacher.teacher.role, UserRole::Teacher);
        assert_eq!(teacher.branches.len(), 1);
        let branch = &teacher.branches[0];
        assert_eq!(branch.branch_name, "Computer Science");
        let years: Vec<i32> = branch.years.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![1, 2]);
        assert_eq!(branch.years[0].subjects, vec!["Maths", "Physics"]);

        let subjects = storage
            .list_teacher_subjects_impl(teacher.teacher.id, cs.id, 1)
            .await
            .unwrap();
        assert_eq!(subjects, vec!["Maths", "Physics"]);
        assert!(
            storage
                .list_teacher_subjects_impl(teacher.teacher.id, cs.id, 4)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_get_teacher_ignores_other_roles() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let admin = storage
            .create_user_impl(crate::models::users::requests::CreateUserRequest {
                name: "Admin".to_string(),
                email: "admin@uni.edu".to_string(),
                password: "$argon2id$placeholder".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();

        assert!(storage.get_teacher_by_id_impl(admin.id).await.unwrap().is_none());
        assert!(!storage.delete_teacher_impl(admin.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(admin.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_and_delete_teachers() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let teacher = storage
            .create_teacher_impl(teacher_request("michael@uni.edu", Vec::new()))
            .await
            .unwrap();
        storage
            .create_teacher_impl(teacher_request("dwight@uni.edu", Vec::new()))
            .await
            .unwrap();

        let result = storage
            .list_teachers_with_pagination_impl(TeacherListQuery {
                page: None,
                size: None,
                search: Some("dwight".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 1);
        assert_eq!(result.items[0].email, "dwight@uni.edu");

        assert!(storage.delete_teacher_impl(teacher.teacher.id).await.unwrap());
        assert!(
            storage
                .get_teacher_by_id_impl(teacher.teacher.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
