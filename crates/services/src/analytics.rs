use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

use dealdesk_config::PipelineSettings;
use dealdesk_db::entities::deal;

use crate::dao::{ActivityDao, DaoResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total_value: f64,
    pub weighted_value: f64,
    pub value_by_stage: BTreeMap<String, StageBreakdown>,
    pub weekly_velocity: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct StageBreakdown {
    pub value: f64,
    pub count: u64,
}

pub struct AnalyticsService {
    conn: DatabaseConnection,
    velocity_window_days: i64,
}

impl AnalyticsService {
    pub fn new(conn: &DatabaseConnection, pipeline: &PipelineSettings) -> Self {
        Self {
            conn: conn.clone(),
            velocity_window_days: pipeline.velocity_window_days,
        }
    }

    /// Scan the deal table once and fold totals, the weighted total, and
    /// the per-stage breakdown; only stages with at least one deal appear
    /// in the breakdown. Velocity counts move entries inside the trailing
    /// window, inclusive at the boundary.
    pub async fn summary(&self, activities: &ActivityDao) -> DaoResult<PipelineSummary> {
        let deals = deal::Entity::find().all(&self.conn).await?;

        let mut total_value = 0.0;
        let mut weighted_value = 0.0;
        let mut value_by_stage: BTreeMap<String, StageBreakdown> = BTreeMap::new();

        for deal in &deals {
            total_value += deal.value;
            weighted_value += deal.value * f64::from(deal.probability) / 100.0;

            let slot = value_by_stage.entry(deal.current_stage.clone()).or_default();
            slot.value += deal.value;
            slot.count += 1;
        }

        let cutoff = Utc::now() - Duration::days(self.velocity_window_days);
        let weekly_velocity = activities.moves_since(cutoff).await?;

        Ok(PipelineSummary {
            total_value,
            weighted_value,
            value_by_stage,
            weekly_velocity,
        })
    }
}
