//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

pub(crate) mod attendance;
pub(crate) mod branches;
pub(crate) mod events;
pub(crate) mod marks;
pub(crate) mod students;
pub(crate) mod teachers;
pub(crate) mod users;

use crate::config::AppConfig;
use crate::errors::{UniError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| UniError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| UniError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| UniError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| UniError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(UniError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


#[cfg(test)]
impl SeaOrmStorage {
    /// 测试用内存数据库（单连接，保证所有查询落在同一个 :memory: 库上）
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| UniError::database_connection(format!("内存数据库连接失败: {e}")))?;
        Migrator::up(&db, None)
            .await
            .map_err(|e| UniError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 专业模块
    async fn create_branch(&self, branch: CreateBranchRequest) -> Result<Branch> {
        self.create_branch_impl(branch).await
    }

    async fn get_branch_by_id(&self, id: i64) -> Result<Option<Branch>> {
        self.get_branch_by_id_impl(id).await
    }

    async fn list_branches(&self) -> Result<Vec<Branch>> {
        self.list_branches_impl().await
    }

    async fn update_branch(&self, id: i64, update: UpdateBranchRequest) -> Result<Option<Branch>> {
        self.update_branch_impl(id, update).await
    }

    async fn delete_branch(&self, id: i64) -> Result<bool> {
        self.delete_branch_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_register_number(
        &self,
        register_number: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_register_number_impl(register_number)
            .await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_by_class(&self, branch_id: i64, year: i32) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(branch_id, year).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRecord,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<TeacherDetail> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherDetail>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn list_teacher_assignments(&self, teacher_id: i64) -> Result<Vec<TeacherAssignment>> {
        self.list_teacher_assignments_impl(teacher_id).await
    }

    async fn list_teacher_subjects(
        &self,
        teacher_id: i64,
        branch_id: i64,
        year: i32,
    ) -> Result<Vec<String>> {
        self.list_teacher_subjects_impl(teacher_id, branch_id, year)
            .await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 成绩模块
    async fn upsert_marks(&self, marks: Vec<UpsertMarkRequest>) -> Result<Vec<Mark>> {
        self.upsert_marks_impl(marks).await
    }

    async fn list_student_marks(&self, student_id: i64) -> Result<Vec<Mark>> {
        self.list_student_marks_impl(student_id).await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        record: UpsertAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        self.upsert_attendance_impl(record).await
    }

    async fn list_student_attendance(&self, student_id: i64) -> Result<Vec<AttendanceRecord>> {
        self.list_student_attendance_impl(student_id).await
    }

    async fn list_attendance_on_date(
        &self,
        student_ids: Vec<i64>,
        date: chrono::NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_on_date_impl(student_ids, date).await
    }

    // 活动模块
    async fn create_event(&self, event: NewEvent) -> Result<Event> {
        self.create_event_impl(event).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.list_events_impl().await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }
}
