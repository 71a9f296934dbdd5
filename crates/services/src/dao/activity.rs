use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use dealdesk_db::entities::activity;

use super::base::DaoResult;

pub struct ActivityDao {
    conn: DatabaseConnection,
}

impl ActivityDao {
    pub fn new(conn: &DatabaseConnection) -> Self {
        Self { conn: conn.clone() }
    }

    /// Append one journal entry. Takes the connection as a parameter so
    /// callers can pass the transaction wrapping the mutation being
    /// journaled.
    pub async fn append<C: ConnectionTrait>(
        &self,
        conn: &C,
        action: activity::Action,
        description: String,
        metadata: serde_json::Value,
        user_id: Option<i32>,
    ) -> DaoResult<activity::Model> {
        let entry = activity::ActiveModel {
            entity_type: Set(activity::PIPELINE.to_string()),
            action: Set(action),
            description: Set(description),
            metadata: Set(metadata),
            timestamp: Set(Utc::now()),
            user_id: Set(user_id),
            ..Default::default()
        };

        Ok(entry.insert(conn).await?)
    }

    /// Newest-first audit feed.
    pub async fn recent(&self, limit: u64) -> DaoResult<Vec<activity::Model>> {
        Ok(activity::Entity::find()
            .order_by(activity::Column::Timestamp, Order::Desc)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    /// Number of pipeline `move_deal` entries at or after `cutoff`. Counts
    /// moves, not distinct deals.
    pub async fn moves_since(&self, cutoff: DateTime<Utc>) -> DaoResult<u64> {
        Ok(activity::Entity::find()
            .filter(activity::Column::EntityType.eq(activity::PIPELINE))
            .filter(activity::Column::Action.eq(activity::Action::MoveDeal))
            .filter(activity::Column::Timestamp.gte(cutoff))
            .count(&self.conn)
            .await?)
    }
}
