use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::{Result, UniError};
use crate::models::marks::{entities::Mark, requests::UpsertMarkRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量写入成绩
    ///
    /// 全部条目在同一事务中写入；同一 学生 + 科目 + 年级 已有成绩时覆盖分数与录入教师。
    pub async fn upsert_marks_impl(&self, entries: Vec<UpsertMarkRequest>) -> Result<Vec<Mark>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UniError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let existing = Marks::find()
                .filter(Column::StudentId.eq(entry.student_id))
                .filter(Column::Subject.eq(entry.subject.as_str()))
                .filter(Column::Year.eq(entry.year))
                .one(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("查询成绩失败: {e}")))?;

            let model = match existing {
                Some(existing) => {
                    let mut model = existing.into_active_model();
                    model.marks = Set(entry.marks);
                    model.teacher_id = Set(Some(entry.teacher_id));
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(|e| UniError::database_operation(format!("更新成绩失败: {e}")))?
                }
                None => ActiveModel {
                    student_id: Set(entry.student_id),
                    teacher_id: Set(Some(entry.teacher_id)),
                    subject: Set(entry.subject),
                    year: Set(entry.year),
                    marks: Set(entry.marks),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| UniError::database_operation(format!("写入成绩失败: {e}")))?,
            };
            saved.push(model.into_mark());
        }

        txn.commit()
            .await
            .map_err(|e| UniError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    /// 列出学生成绩，按年级、科目排序
    pub async fn list_student_marks_impl(&self, student_id: i64) -> Result<Vec<Mark>> {
        let rows = Marks::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Subject)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_mark()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::{
        branches::tests::branch_request,
        students::tests::student_request,
        teachers::tests::{assignment, teacher_request},
    };

    fn mark(
        student_id: i64,
        teacher_id: i64,
        subject: &str,
        year: i32,
        marks: i32,
    ) -> UpsertMarkRequest {
        UpsertMarkRequest {
            student_id,
            teacher_id,
            subject: subject.to_string(),
            year,
            marks,
        }
    }

    #[tokio::test]
    async fn test_reassigning_overwrites() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();
        let teacher = storage
            .create_teacher_impl(teacher_request(
                "michael@uni.edu",
                vec![
                    assignment(branch.id, 1, "Maths"),
                    assignment(branch.id, 1, "Physics"),
                ],
            ))
            .await
            .unwrap();
        let teacher_id = teacher.teacher.id;

        let saved = storage
            .upsert_marks_impl(vec![
                mark(student.id, teacher_id, "Physics", 1, 70),
                mark(student.id, teacher_id, "Maths", 1, 55),
            ])
            .await
            .unwrap();
        assert_eq!(saved.len(), 2);

        storage
            .upsert_marks_impl(vec![mark(student.id, teacher_id, "Maths", 1, 91)])
            .await
            .unwrap();

        let marks = storage.list_student_marks_impl(student.id).await.unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].subject, "Maths");
        assert_eq!(marks[0].marks, 91);
        assert_eq!(marks[1].subject, "Physics");
        assert_eq!(marks[1].marks, 70);
    }

    #[tokio::test]
    async fn test_marks_survive_teacher_deletion() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();
        let teacher = storage
            .create_teacher_impl(teacher_request(
                "michael@uni.edu",
                vec![assignment(branch.id, 1, "Maths")],
            ))
            .await
            .unwrap();

        storage
            .upsert_marks_impl(vec![mark(student.id, teacher.teacher.id, "Maths", 1, 64)])
            .await
            .unwrap();
        assert!(storage.delete_teacher_impl(teacher.teacher.id).await.unwrap());

        let marks = storage.list_student_marks_impl(student.id).await.unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].teacher_id, None);
    }

    #[tokio::test]
    async fn test_failed_batch_writes_nothing() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let branch = storage
            .create_branch_impl(branch_request("Computer Science"))
            .await
            .unwrap();
        let student = storage
            .create_student_impl(student_request("21CS001", branch.id, 1))
            .await
            .unwrap();
        let teacher = storage
            .create_teacher_impl(teacher_request("michael@uni.edu", Vec::new()))
            .await
            .unwrap();

        // 第二条引用不存在的学生，外键失败导致整批回滚
        let result = storage
            .upsert_marks_impl(vec![
                mark(student.id, teacher.teacher.id, "Maths", 1, 80),
                mark(424242, teacher.teacher.id, "Maths", 1, 80),
            ])
            .await;
        assert!(result.is_err());
        assert!(
            storage
                .list_student_marks_impl(student.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
