use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection,
    EntityTrait, Order, QueryOrder, QuerySelect,
};

use dealdesk_db::entities::notification;

use super::base::DaoResult;

#[derive(Debug)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub severity: notification::Severity,
    pub metadata: serde_json::Value,
    pub user_id: Option<i32>,
}

pub struct NotificationDao {
    conn: DatabaseConnection,
}

impl NotificationDao {
    pub fn new(conn: &DatabaseConnection) -> Self {
        Self { conn: conn.clone() }
    }

    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        data: NewNotification,
    ) -> DaoResult<notification::Model> {
        let entry = notification::ActiveModel {
            title: Set(data.title),
            message: Set(data.message),
            severity: Set(data.severity),
            metadata: Set(data.metadata),
            timestamp: Set(Utc::now()),
            user_id: Set(data.user_id),
            ..Default::default()
        };

        Ok(entry.insert(conn).await?)
    }

    pub async fn recent(&self, limit: u64) -> DaoResult<Vec<notification::Model>> {
        Ok(notification::Entity::find()
            .order_by(notification::Column::Timestamp, Order::Desc)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }
}
