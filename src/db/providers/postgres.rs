use anyhow::{Context, Result};
use sea_orm::{Database, DatabaseConnection};

use super::pool_options;
use crate::config::DatabaseConfig;

pub(super) async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    Database::connect(pool_options(cfg))
        .await
        .context("failed to connect to postgres")
}
