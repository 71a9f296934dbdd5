use axum::{Json, extract::State};

use dealdesk_services::analytics::PipelineSummary;

use crate::{error::ApiError, state::AppState};

pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<PipelineSummary>, ApiError> {
    let summary = state.analytics.summary(&state.activities).await?;
    Ok(Json(summary))
}
