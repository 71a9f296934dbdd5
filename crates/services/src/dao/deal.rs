use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    Order, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use dealdesk_config::PipelineSettings;
use dealdesk_db::entities::{activity, deal, notification};

use super::activity::ActivityDao;
use super::base::{DaoError, DaoResult};
use super::notification::{NewNotification, NotificationDao};

/// Query parameters for the board listing: a conjunction of optional
/// exact-match predicates plus a single descending sort key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealQuery {
    pub assigned_to: Option<String>,
    pub product: Option<String>,
    pub source: Option<String>,
    /// Matched against `current_stage`; the stage is the card's status.
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortBy {
    Value,
    Date,
    Probability,
}

impl SortBy {
    /// Unknown keys sort nothing; the list stays in insertion order.
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "value" => Some(Self::Value),
            "date" => Some(Self::Date),
            "probability" => Some(Self::Probability),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub value: f64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub probability: i32,
    #[serde(default = "default_stage")]
    pub current_stage: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_stage() -> String {
    "lead".to_string()
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(range(min = 0.0))]
    pub value: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i32>,
    pub current_stage: Option<String>,
    pub assigned_to: Option<String>,
    pub product: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

pub struct DealDao {
    conn: DatabaseConnection,
    stagnant_after_days: i64,
}

impl DealDao {
    pub fn new(conn: &DatabaseConnection, pipeline: &PipelineSettings) -> Self {
        Self {
            conn: conn.clone(),
            stagnant_after_days: pipeline.stagnant_after_days,
        }
    }

    /// Board listing. Every supplied non-empty predicate narrows the
    /// result by exact match; with no recognized sort key the rows come
    /// back in insertion order.
    pub async fn list(&self, query: &DealQuery) -> DaoResult<Vec<deal::Model>> {
        let mut select = deal::Entity::find();

        if let Some(v) = non_empty(&query.assigned_to) {
            select = select.filter(deal::Column::AssignedTo.eq(v));
        }
        if let Some(v) = non_empty(&query.product) {
            select = select.filter(deal::Column::Product.eq(v));
        }
        if let Some(v) = non_empty(&query.source) {
            select = select.filter(deal::Column::Source.eq(v));
        }
        if let Some(v) = non_empty(&query.status) {
            select = select.filter(deal::Column::CurrentStage.eq(v));
        }

        let sort = query.sort_by.as_deref().and_then(SortBy::parse);
        select = match sort {
            Some(SortBy::Value) => select.order_by(deal::Column::Value, Order::Desc),
            Some(SortBy::Date) => select.order_by(deal::Column::UpdatedAt, Order::Desc),
            Some(SortBy::Probability) => {
                select.order_by(deal::Column::Probability, Order::Desc)
            }
            None => select.order_by(deal::Column::Id, Order::Asc),
        };

        Ok(select.all(&self.conn).await?)
    }

    pub async fn create(
        &self,
        activities: &ActivityDao,
        data: NewDeal,
        user_id: Option<i32>,
    ) -> DaoResult<deal::Model> {
        data.validate()
            .map_err(|e| DaoError::Validation(e.to_string()))?;

        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let created = deal::ActiveModel {
            company_name: Set(data.company_name),
            contact_name: Set(data.contact_name),
            contact_email: Set(data.contact_email),
            contact_phone: Set(data.contact_phone),
            value: Set(data.value),
            probability: Set(data.probability),
            current_stage: Set(data.current_stage),
            assigned_to: Set(data.assigned_to),
            product: Set(data.product),
            source: Set(data.source),
            notes: Set(data.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        activities
            .append(
                &txn,
                activity::Action::CreateDeal,
                format!("Created deal for {}", created.company_name),
                json!({ "dealId": created.id }),
                user_id,
            )
            .await?;

        txn.commit().await?;
        debug!(id = created.id, "created deal");

        Ok(created)
    }

    pub async fn update(
        &self,
        activities: &ActivityDao,
        id: i32,
        patch: DealPatch,
        user_id: Option<i32>,
    ) -> DaoResult<deal::Model> {
        patch
            .validate()
            .map_err(|e| DaoError::Validation(e.to_string()))?;

        let txn = self.conn.begin().await?;

        let existing = deal::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DaoError::NotFound)?;
        let mut active: deal::ActiveModel = existing.into();

        // Journal metadata carries the wire names of the changed fields.
        let mut changed: Vec<&str> = Vec::new();
        if let Some(v) = patch.company_name {
            active.company_name = Set(v);
            changed.push("companyName");
        }
        if let Some(v) = patch.contact_name {
            active.contact_name = Set(Some(v));
            changed.push("contactName");
        }
        if let Some(v) = patch.contact_email {
            active.contact_email = Set(Some(v));
            changed.push("contactEmail");
        }
        if let Some(v) = patch.contact_phone {
            active.contact_phone = Set(Some(v));
            changed.push("contactPhone");
        }
        if let Some(v) = patch.value {
            active.value = Set(v);
            changed.push("value");
        }
        if let Some(v) = patch.probability {
            active.probability = Set(v);
            changed.push("probability");
        }
        if let Some(v) = patch.current_stage {
            active.current_stage = Set(v);
            changed.push("currentStage");
        }
        if let Some(v) = patch.assigned_to {
            active.assigned_to = Set(Some(v));
            changed.push("assignedTo");
        }
        if let Some(v) = patch.product {
            active.product = Set(Some(v));
            changed.push("product");
        }
        if let Some(v) = patch.source {
            active.source = Set(Some(v));
            changed.push("source");
        }
        if let Some(v) = patch.notes {
            active.notes = Set(Some(v));
            changed.push("notes");
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;

        activities
            .append(
                &txn,
                activity::Action::UpdateDeal,
                format!("Updated deal for {}", updated.company_name),
                json!({ "dealId": id, "changedFields": changed }),
                user_id,
            )
            .await?;

        txn.commit().await?;
        debug!(id, "updated deal");

        Ok(updated)
    }

    /// Move a deal to another column. Any stage may move to any other
    /// stage, and a deal untouched for `stagnant_after_days` or longer
    /// additionally raises a warning notification. The staleness check
    /// uses the pre-move `updated_at` and never blocks the move.
    pub async fn move_stage(
        &self,
        activities: &ActivityDao,
        notifications: &NotificationDao,
        id: i32,
        new_stage: String,
        user_id: Option<i32>,
    ) -> DaoResult<deal::Model> {
        // TODO: reject stages outside deal::STAGES once the board client
        // stops sending custom lane names.
        let now = Utc::now();
        let txn = self.conn.begin().await?;

        let existing = deal::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DaoError::NotFound)?;
        let last_touched = existing.updated_at;

        let mut active: deal::ActiveModel = existing.into();
        active.current_stage = Set(new_stage.clone());
        active.updated_at = Set(now);
        let moved = active.update(&txn).await?;

        activities
            .append(
                &txn,
                activity::Action::MoveDeal,
                format!("Moved deal for {} to {}", moved.company_name, new_stage),
                json!({ "dealId": id, "newStage": new_stage }),
                user_id,
            )
            .await?;

        let idle_days = (now - last_touched).num_days();
        if idle_days >= self.stagnant_after_days {
            notifications
                .create(
                    &txn,
                    NewNotification {
                        title: "Stagnant Deal Alert".to_string(),
                        message: format!(
                            "{} sat idle for {} days before this move",
                            moved.company_name, idle_days
                        ),
                        severity: notification::Severity::Warning,
                        metadata: json!({ "dealId": id, "idleDays": idle_days }),
                        user_id,
                    },
                )
                .await?;
            info!(deal_id = id, idle_days, "stagnant deal moved");
        }

        txn.commit().await?;

        Ok(moved)
    }

    /// Hard delete. A failed lookup appends nothing to the journal.
    pub async fn delete(
        &self,
        activities: &ActivityDao,
        id: i32,
        user_id: Option<i32>,
    ) -> DaoResult<()> {
        let txn = self.conn.begin().await?;

        let existing = deal::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DaoError::NotFound)?;

        deal::Entity::delete_by_id(id).exec(&txn).await?;

        activities
            .append(
                &txn,
                activity::Action::DeleteDeal,
                format!("Deleted deal for {}", existing.company_name),
                json!({ "dealId": id }),
                user_id,
            )
            .await?;

        txn.commit().await?;
        debug!(id, "deleted deal");

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
