mod postgres;
mod sqlite;

use std::time::Duration;

use anyhow::{Result, bail};
use sea_orm::{ConnectOptions, DatabaseConnection};

use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Storage engines the todo store can run on, picked from the url scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Sqlite,
    Postgres,
}

impl DbBackend {
    pub fn from_url(url: &str) -> Result<Self> {
        let normalized = url.trim().to_ascii_lowercase();
        if normalized.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if normalized.starts_with("postgres://") || normalized.starts_with("postgresql://")
        {
            Ok(Self::Postgres)
        } else {
            bail!(
                "unsupported database url '{}'; expected scheme sqlite:, postgres:// or postgresql://",
                redact_url(url)
            )
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }

    pub async fn connect(self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        match self {
            Self::Sqlite => sqlite::connect(cfg).await,
            Self::Postgres => postgres::connect(cfg).await,
        }
    }
}

fn pool_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    options
}

/// Database urls can carry credentials; only the scheme is safe to log.
fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.split_once("://") {
        Some((scheme, _)) => format!("{scheme}://<redacted>"),
        None => match trimmed.split_once(':') {
            Some((scheme, _)) => format!("{scheme}:<redacted>"),
            None => "<invalid-url>".to_string(),
        },
    }
}
