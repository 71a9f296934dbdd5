use dealdesk_api::{build_router, state::AppState};
use dealdesk_config::{AppSettings, DatabaseSettings, PipelineSettings, Settings};
use dealdesk_db::{connect, schema::ensure_schema};
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// A running test application over its own in-memory SQLite database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub base_url: String,
    pub conn: DatabaseConnection,
    pub settings: Settings,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn a test server on a random port.
    pub async fn spawn() -> Self {
        Self::spawn_with_settings(|_| {}).await
    }

    /// Spawn a test server with customized settings.
    ///
    /// The `mutator` closure receives a `&mut Settings` after test defaults
    /// are applied, allowing tests to tweak specific fields (e.g., the
    /// stagnation threshold).
    pub async fn spawn_with_settings(mutator: impl FnOnce(&mut Settings)) -> Self {
        let mut settings = test_settings();
        mutator(&mut settings);

        let conn = connect(&settings)
            .await
            .expect("Failed to connect to test database");
        ensure_schema(&conn).await.expect("Failed to create schema");

        let app_state = AppState::new(conn.clone(), settings.clone());
        let app = build_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        let client = reqwest::Client::new();

        Self {
            addr,
            base_url,
            conn,
            settings,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn test_settings() -> Settings {
    Settings {
        app: AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
        },
        database: DatabaseSettings {
            // A single pooled connection, so every handle sees the same
            // in-memory database.
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
            sqlx_logging: false,
        },
        pipeline: PipelineSettings {
            stagnant_after_days: 30,
            velocity_window_days: 7,
        },
    }
}
