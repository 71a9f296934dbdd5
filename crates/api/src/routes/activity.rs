use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use dealdesk_db::entities::activity;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<u64>,
}

const DEFAULT_FEED_LIMIT: u64 = 50;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<activity::Model>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    let feed = state.activities.recent(limit).await?;
    Ok(Json(feed))
}
