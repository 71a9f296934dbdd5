pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{get, patch, put},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pipeline_routes = Router::new()
        .route(
            "/deals",
            get(routes::deal::list).post(routes::deal::create),
        )
        .route(
            "/deals/{id}",
            put(routes::deal::update).delete(routes::deal::remove),
        )
        .route("/deals/{id}/stage", patch(routes::deal::move_stage))
        .route("/analytics", get(routes::analytics::summary))
        .route("/activities", get(routes::activity::list))
        .route("/notifications", get(routes::notification::list));

    Router::new()
        .nest("/api/pipeline", pipeline_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
