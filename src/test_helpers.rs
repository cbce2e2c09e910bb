use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::Router;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

static NEXT_FILE_STORE: AtomicUsize = AtomicUsize::new(0);

/// State backed by a private, empty in-memory store with the schema synced.
pub async fn memory_state() -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig {
            max_connections: 1,
            min_idle: 1,
            ..DatabaseConfig::with_url(MEMORY_DATABASE_URL)
        },
        ..AppConfig::default()
    };
    let db = connection::connect(&cfg.database)
        .await
        .expect("open in-memory database");
    AppState::new(cfg, db)
}

/// A fresh sqlite file in the temp dir behind the default connection pool.
/// The database files are removed on drop.
pub struct FileStore {
    pub state: Arc<AppState>,
    path: PathBuf,
}

impl FileStore {
    pub async fn open() -> Self {
        let path = std::env::temp_dir().join(format!(
            "todo-service-{}-{}.db",
            std::process::id(),
            NEXT_FILE_STORE.fetch_add(1, Ordering::Relaxed)
        ));
        remove_store_files(&path);

        let cfg = AppConfig {
            database: DatabaseConfig::with_url(format!("sqlite://{}?mode=rwc", path.display())),
            ..AppConfig::default()
        };
        let db = connection::connect(&cfg.database)
            .await
            .expect("open file database");
        Self {
            state: AppState::new(cfg, db),
            path,
        }
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        remove_store_files(&self.path);
    }
}

fn remove_store_files(path: &Path) {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub fn test_app(state: &Arc<AppState>) -> Router {
    app(Arc::clone(state))
}
