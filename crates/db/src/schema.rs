use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};
use tracing::info;

use crate::entities::{activity, deal, notification};

/// Create tables and indexes derived from the entity definitions if they
/// do not exist yet. Runs on every startup.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_for_entity(db, deal::Entity).await?;
    create_for_entity(db, activity::Entity).await?;
    create_for_entity(db, notification::Entity).await?;

    info!("Database schema ensured");

    Ok(())
}

async fn create_for_entity<E: EntityTrait>(
    db: &DatabaseConnection,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table: TableCreateStatement = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    Ok(())
}
