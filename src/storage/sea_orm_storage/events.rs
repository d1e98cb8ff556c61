use super::SeaOrmStorage;
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{Result, UniError};
use crate::models::events::{entities::Event, requests::NewEvent};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建活动
    pub async fn create_event_impl(&self, req: NewEvent) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            event_date: Set(req.date.timestamp()),
            url: Set(req.url),
            created_by: Set(Some(req.created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 列出活动，按活动时间升序
    pub async fn list_events_impl(&self) -> Result<Vec<Event>> {
        let rows = Events::find()
            .order_by_asc(Column::EventDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_event()).collect())
    }

    /// 删除活动
    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| UniError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
