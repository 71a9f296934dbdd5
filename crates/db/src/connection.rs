use dealdesk_config::Settings;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

pub async fn connect(settings: &Settings) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(&settings.database.url);

    if let Some(max) = settings.database.max_connections {
        options.max_connections(max);
    }
    if let Some(min) = settings.database.min_connections {
        options.min_connections(min);
    }
    options.sqlx_logging(settings.database.sqlx_logging);

    let conn = Database::connect(options).await?;

    // Verify connection
    conn.ping().await?;

    info!(url = %settings.database.url, "Connected to database");

    Ok(conn)
}
