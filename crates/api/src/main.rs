use dealdesk_api::{build_router, state::AppState};
use dealdesk_config::Settings;
use dealdesk_db::{connect, schema::ensure_schema};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "dealdesk_api=debug,dealdesk_services=debug,dealdesk_db=debug,tower_http=debug"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        "Starting Dealdesk API on {}:{}",
        settings.app.host, settings.app.port
    );

    // Connect to the database and make sure the schema exists
    let conn = connect(&settings).await?;
    ensure_schema(&conn).await?;

    // Build app state
    let app_state = AppState::new(conn, settings.clone());

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
