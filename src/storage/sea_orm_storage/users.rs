use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, UniError};
use crate::models::users::{
    entities::{User, UserRole, UserStatus},
    requests::CreateUserRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计某角色的用户数量
    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            name: "Pam Beesly".to_string(),
            email: email.to_string(),
            password: "$argon2id$placeholder".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_user("pam@dunder.edu", UserRole::Admin))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_active());
        assert!(user.last_login.is_none());

        let found = storage
            .get_user_by_email_impl("pam@dunder.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert!(
            storage
                .get_user_by_email_impl("nobody@dunder.edu")
                .await
                .unwrap()
                .is_none()
        );

        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_user_impl(new_user("dup@dunder.edu", UserRole::Teacher))
            .await
            .unwrap();

        let err = storage
            .create_user_impl(new_user("dup@dunder.edu", UserRole::Student))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_count_users_by_role() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert_eq!(
            storage.count_users_by_role_impl(UserRole::Admin).await.unwrap(),
            0
        );
        storage
            .create_user_impl(new_user("a@dunder.edu", UserRole::Admin))
            .await
            .unwrap();
        storage
            .create_user_impl(new_user("t@dunder.edu", UserRole::Teacher))
            .await
            .unwrap();
        assert_eq!(
            storage.count_users_by_role_impl(UserRole::Admin).await.unwrap(),
            1
        );
    }
}
