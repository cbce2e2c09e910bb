use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::info;

use super::{
    dao::{DaoResult, todo_dao::new_todo},
    entities::{prelude::StoreMeta, store_meta},
};

pub const SCHEMA_VERSION_KEY: &str = "schema_version";
pub const SCHEMA_VERSION: &str = "1";
pub const SEED_TODOS: [&str; 2] = ["Lære meg Python", "Lære meg Flask"];

/// Seeds the example todos the first time a store is opened.
///
/// Gated on the `schema_version` marker, not on row count: a store whose
/// todos were all deleted stays empty. Returns whether seeding happened.
pub async fn seed_if_fresh(db: &DatabaseConnection) -> DaoResult<bool> {
    let txn = db.begin().await?;
    if let Some(marker) = StoreMeta::find_by_id(SCHEMA_VERSION_KEY.to_string())
        .one(&txn)
        .await?
    {
        info!(schema_version = %marker.value, "store already initialised");
        return Ok(false);
    }

    info!("fresh store, adding example todos");
    for text in SEED_TODOS {
        new_todo(text).insert(&txn).await?;
    }
    store_meta::ActiveModel {
        name: Set(SCHEMA_VERSION_KEY.to_string()),
        value: Set(SCHEMA_VERSION.to_string()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(true)
}
