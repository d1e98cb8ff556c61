use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::branch_subjects::{
    ActiveModel as BranchSubjectActiveModel, Column as BranchSubjectColumn,
    Entity as BranchSubjects, Model as BranchSubjectModel,
};
use crate::entity::branches::{ActiveModel, Column, Entity as Branches};
use crate::entity::student_profiles::{Column as StudentProfileColumn, Entity as StudentProfiles};
use crate::entity::teacher_assignments::{
    Column as AssignmentColumn, Entity as TeacherAssignments,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, UniError};
use crate::models::branches::{
    entities::{Branch, BranchYear},
    requests::{CreateBranchRequest, UpdateBranchRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 写入专业的课程表，position 记录科目在该年级内的顺序
async fn insert_subjects<C: ConnectionTrait>(
    conn: &C,
    branch_id: i64,
    years: &[BranchYear],
) -> Result<()> {
    let rows: Vec<BranchSubjectActiveModel> = years
        .iter()
        .flat_map(|entry| {
            entry
                .subjects
                .iter()
                .enumerate()
                .map(move |(position, subject)| BranchSubjectActiveModel {
                    branch_id: Set(branch_id),
                    year: Set(entry.year),
                    subject: Set(subject.clone()),
                    position: Set(position as i32),
                    ..Default::default()
                })
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    BranchSubjects::insert_many(rows)
        .exec(conn)
        .await
        .map_err(|e| UniError::database_operation(format!("写入专业课程失败: {e}")))?;

    Ok(())
}

/// 删除该专业中课程表已不再开设的授课分配
async fn prune_assignments<C: ConnectionTrait>(
    conn: &C,
    branch_id: i64,
    years: &[BranchYear],
) -> Result<u64> {
    let assignments = TeacherAssignments::find()
        .filter(AssignmentColumn::BranchId.eq(branch_id))
        .all(conn)
        .await
        .map_err(|e| UniError::database_operation(format!("查询授课分配失败: {e}")))?;

    let stale: Vec<i64> = assignments
        .into_iter()
        .filter(|a| {
            !years
                .iter()
                .any(|y| y.year == a.year && y.subjects.iter().any(|s| s == &a.subject))
        })
        .map(|a| a.id)
        .collect();
    if stale.is_empty() {
        return Ok(0);
    }

    let result = TeacherAssignments::delete_many()
        .filter(AssignmentColumn::Id.is_in(stale))
        .exec(conn)
        .await
        .map_err(|e| UniError::database_operation(format!("清理授课分配失败: {e}")))?;

    Ok(result.rows_affected)
}

impl SeaOrmStorage {
    /// 创建专业
    pub async fn create_branch_impl(&self, req: CreateBranchRequest) -> Result<Branch> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            branch_name: Set(req.branch_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let branch = model
            .insert(&txn)
            .await
            .map_err(|e| UniError::database_operation(format!("创建专业失败: {e}")))?;

        insert_subjects(&txn, branch.id, &req.years).await?;

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_branch_by_id_impl(branch.id)
            .await?
            .ok_or_else(|| UniError::not_found(format!("Branch {} not found", branch.id)))
    }

    /// 通过 ID 获取专业
    pub async fn get_branch_by_id_impl(&self, id: i64) -> Result<Option<Branch>> {
        let Some(branch) = Branches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业失败: {e}")))?
        else {
            return Ok(None);
        };

        let subjects = BranchSubjects::find()
            .filter(BranchSubjectColumn::BranchId.eq(id))
            .order_by_asc(BranchSubjectColumn::Year)
            .order_by_asc(BranchSubjectColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业课程失败: {e}")))?;

        Ok(Some(branch.into_branch(subjects)))
    }

    /// 列出全部专业
    pub async fn list_branches_impl(&self) -> Result<Vec<Branch>> {
        let branches = Branches::find()
            .order_by_asc(Column::BranchName)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业列表失败: {e}")))?;

        let subjects = BranchSubjects::find()
            .order_by_asc(BranchSubjectColumn::BranchId)
            .order_by_asc(BranchSubjectColumn::Year)
            .order_by_asc(BranchSubjectColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业课程失败: {e}")))?;

        let mut by_branch: HashMap<i64, Vec<BranchSubjectModel>> = HashMap::new();
        for row in subjects {
            by_branch.entry(row.branch_id).or_default().push(row);
        }

        Ok(branches
            .into_iter()
            .map(|branch| {
                let rows = by_branch.remove(&branch.id).unwrap_or_default();
                branch.into_branch(rows)
            })
            .collect())
    }

    /// 更新专业
    pub async fn update_branch_impl(
        &self,
        id: i64,
        update: UpdateBranchRequest,
    ) -> Result<Option<Branch>> {
        let existing = Branches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(branch_name) = update.branch_name {
            model.branch_name = Set(branch_name);
        }
        model
            .update(&txn)
            .await
            .map_err(|e| UniError::database_operation(format!("更新专业失败: {e}")))?;

        if let Some(years) = update.years {
            BranchSubjects::delete_many()
                .filter(BranchSubjectColumn::BranchId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("清空专业课程失败: {e}")))?;
            insert_subjects(&txn, id, &years).await?;
            prune_assignments(&txn, id, &years).await?;
        }

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_branch_by_id_impl(id).await
    }

    /// 删除专业
    ///
    /// 该专业学生的用户账号一并删除，其成绩与考勤随用户级联删除；
    /// 课程与授课分配随专业级联删除。
    pub async fn delete_branch_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let student_ids: Vec<i64> = StudentProfiles::find()
            .select_only()
            .column(StudentProfileColumn::UserId)
            .filter(StudentProfileColumn::BranchId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| UniError::database_operation(format!("查询专业学生失败: {e}")))?;

        if !student_ids.is_empty() {
            Users::delete_many()
                .filter(UserColumn::Id.is_in(student_ids))
                .exec(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("删除专业学生失败: {e}")))?;
        }

        let result = Branches::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| UniError::database_operation(format!("删除专业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
