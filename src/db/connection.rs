use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;

use super::providers::DbBackend;

const ENTITY_REGISTRY: &str = "todo_service::db::entities::*";

/// Opens the pool for the backend named by the url scheme and syncs the
/// schema from the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let backend = DbBackend::from_url(&cfg.url)?;
    info!(backend = backend.as_str(), "connecting to database");

    let db = backend.connect(cfg).await?;

    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_REGISTRY)
        .sync(db)
        .await
        .context("failed to sync database schema")?;
    Ok(())
}
