use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use super::pool_options;
use crate::config::DatabaseConfig;

/// How long a writer waits for the store lock before failing with "database is locked".
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(super) async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    Database::connect(sqlite_options(cfg))
        .await
        .context("failed to open sqlite database")
}

fn sqlite_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = pool_options(cfg);
    if is_in_memory(&cfg.url) {
        // every connection would open its own empty database
        options.max_connections(1).min_connections(1);
    }
    // applied to each connection the pool opens
    options.map_sqlx_sqlite_opts(|opts| opts.busy_timeout(BUSY_TIMEOUT));
    options
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::{is_in_memory, sqlite_options};
    use crate::config::DatabaseConfig;

    #[test]
    fn detects_in_memory_databases() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://todo?mode=memory"));
        assert!(!is_in_memory("sqlite://todo.db?mode=rwc"));
    }

    #[test]
    fn in_memory_store_is_pinned_to_one_connection() {
        let options = sqlite_options(&DatabaseConfig::with_url("sqlite::memory:"));
        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
    }

    #[test]
    fn file_store_keeps_the_configured_pool() {
        let cfg = DatabaseConfig {
            max_connections: 8,
            min_idle: 2,
            ..DatabaseConfig::with_url("sqlite://todo.db?mode=rwc")
        };
        let options = sqlite_options(&cfg);
        assert_eq!(options.get_max_connections(), Some(8));
        assert_eq!(options.get_min_connections(), Some(2));
    }
}
