use crate::models::{
    attendance::{entities::AttendanceRecord, requests::UpsertAttendanceRequest},
    branches::{
        entities::Branch,
        requests::{CreateBranchRequest, UpdateBranchRequest},
    },
    events::{entities::Event, requests::NewEvent},
    marks::{entities::Mark, requests::UpsertMarkRequest},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRecord},
        responses::StudentListResponse,
    },
    teachers::{
        entities::{TeacherAssignment, TeacherDetail},
        requests::{CreateTeacherRequest, TeacherListQuery},
        responses::TeacherListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计某角色的用户数量
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 专业管理方法
    // 创建专业（years 需已规范化）
    async fn create_branch(&self, branch: CreateBranchRequest) -> Result<Branch>;
    // 通过ID获取专业
    async fn get_branch_by_id(&self, id: i64) -> Result<Option<Branch>>;
    // 列出全部专业
    async fn list_branches(&self) -> Result<Vec<Branch>>;
    // 更新专业（years 为 Some 时整体替换课程表）
    async fn update_branch(&self, id: i64, update: UpdateBranchRequest) -> Result<Option<Branch>>;
    // 删除专业
    async fn delete_branch(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生（用户 + 学籍档案）
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生
    async fn get_student_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<Option<Student>>;
    // 分页列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出某专业某年级的学生（按学号排序）
    async fn list_students_by_class(&self, branch_id: i64, year: i32) -> Result<Vec<Student>>;
    // 更新学生
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRecord,
    ) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    // 创建教师（用户 + 授课分配）
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<TeacherDetail>;
    // 通过ID获取教师及其授课分配
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherDetail>>;
    // 分页列出教师
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    // 列出教师的授课分配
    async fn list_teacher_assignments(&self, teacher_id: i64) -> Result<Vec<TeacherAssignment>>;
    // 列出教师在某专业某年级教授的科目
    async fn list_teacher_subjects(
        &self,
        teacher_id: i64,
        branch_id: i64,
        year: i32,
    ) -> Result<Vec<String>>;
    // 删除教师
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    // 批量写入成绩（单个事务，按 学生 + 科目 + 年级 覆盖）
    async fn upsert_marks(&self, marks: Vec<UpsertMarkRequest>) -> Result<Vec<Mark>>;
    // 列出学生成绩（按年级、科目排序）
    async fn list_student_marks(&self, student_id: i64) -> Result<Vec<Mark>>;

    /// 考勤管理方法
    // 写入考勤（按 学生 + 日期 覆盖）
    async fn upsert_attendance(&self, record: UpsertAttendanceRequest)
    -> Result<AttendanceRecord>;
    // 列出学生考勤（按日期排序）
    async fn list_student_attendance(&self, student_id: i64) -> Result<Vec<AttendanceRecord>>;
    // 列出一批学生某天的考勤
    async fn list_attendance_on_date(
        &self,
        student_ids: Vec<i64>,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 活动管理方法
    // 创建活动
    async fn create_event(&self, event: NewEvent) -> Result<Event>;
    // 列出活动（按活动时间排序）
    async fn list_events(&self) -> Result<Vec<Event>>;
    // 删除活动
    async fn delete_event(&self, id: i64) -> Result<bool>;
}

/// 创建存储实例并完成数据库迁移
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
