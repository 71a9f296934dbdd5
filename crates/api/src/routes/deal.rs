use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use dealdesk_db::entities::deal;
use dealdesk_services::dao::deal::{DealPatch, DealQuery, NewDeal};

use crate::{error::ApiError, state::AppState};

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DealQuery>,
) -> Result<Json<Vec<deal::Model>>, ApiError> {
    let deals = state.deals.list(&query).await?;
    Ok(Json(deals))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewDeal>,
) -> Result<Json<deal::Model>, ApiError> {
    let created = state.deals.create(&state.activities, body, None).await?;
    Ok(Json(created))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<DealPatch>,
) -> Result<Json<deal::Model>, ApiError> {
    let updated = state
        .deals
        .update(&state.activities, id, body, None)
        .await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct MoveDealRequest {
    pub stage: String,
}

pub async fn move_stage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<MoveDealRequest>,
) -> Result<Json<deal::Model>, ApiError> {
    let moved = state
        .deals
        .move_stage(
            &state.activities,
            &state.notifications,
            id,
            body.stage,
            None,
        )
        .await?;
    Ok(Json(moved))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.deals.delete(&state.activities, id, None).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
