use axum::{
    Json,
    extract::{Query, State},
};

use dealdesk_db::entities::notification;

use crate::routes::activity::FeedQuery;
use crate::{error::ApiError, state::AppState};

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<notification::Model>>, ApiError> {
    let limit = query.limit.unwrap_or(50);
    let feed = state.notifications.recent(limit).await?;
    Ok(Json(feed))
}
