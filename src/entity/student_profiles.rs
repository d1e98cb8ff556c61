//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub register_number: String,
    pub branch_id: i64,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::branches::Entity",
        from = "Column::BranchId",
        to = "super::branches::Column::Id"
    )]
    Branch,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(
        self,
        user: super::users::Model,
        branch_name: String,
    ) -> crate::models::students::entities::Student {
        use super::timestamp_to_datetime;
        use crate::models::students::entities::Student;
        use crate::models::users::entities::UserStatus;

        Student {
            id: user.id,
            name: user.name,
            email: user.email,
            register_number: self.register_number,
            branch_id: self.branch_id,
            branch_name,
            year: self.year,
            status: user
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Active),
            created_at: timestamp_to_datetime(user.created_at),
        }
    }
}
