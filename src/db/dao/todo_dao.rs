use chrono::{SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use super::DaoResult;
use crate::db::entities::prelude::Todo;
use crate::db::entities::todo;

/// Text stored when a todo is created without any.
pub const DEFAULT_TEXT: &str = "Default text";
const DEFAULT_PRIORITY: i32 = 1;

/// Partial update: `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.priority.is_none()
    }

    pub fn apply_to(self, active: &mut todo::ActiveModel) {
        if let Some(text) = self.text {
            active.text = Set(text);
        }
        if let Some(completed) = self.completed {
            active.completed = Set(completed);
        }
        if let Some(priority) = self.priority {
            active.priority = Set(priority);
        }
    }
}

/// Builds an unsaved todo; the database assigns the id on insert.
/// Text is kept as given unless it is blank.
pub fn new_todo(text: &str) -> todo::ActiveModel {
    let text = if text.trim().is_empty() {
        DEFAULT_TEXT
    } else {
        text
    };
    todo::ActiveModel {
        text: Set(text.to_string()),
        completed: Set(false),
        priority: Set(DEFAULT_PRIORITY),
        // sqlite and postgres keep microseconds; store what reads back
        created: Set(Utc::now().trunc_subsecs(6).fixed_offset()),
        ..Default::default()
    }
}

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn list_all(&self) -> DaoResult<Vec<todo::Model>> {
        Ok(Todo::find()
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn count(&self) -> DaoResult<u64> {
        Ok(Todo::find().count(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> DaoResult<Option<todo::Model>> {
        Ok(Todo::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, text: &str) -> DaoResult<todo::Model> {
        Ok(new_todo(text).insert(&self.db).await?)
    }

    /// Writes only the present fields with one `UPDATE` statement outside any
    /// explicit transaction, so concurrent writers queue on the store lock.
    pub async fn update(&self, id: i32, changes: TodoUpdate) -> DaoResult<Option<todo::Model>> {
        let Some(model) = self.get(id).await? else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(model));
        }

        let mut active = model.into_active_model();
        changes.apply_to(&mut active);
        match Todo::update(active).exec(&self.db).await {
            Ok(model) => Ok(Some(model)),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> DaoResult<bool> {
        let result = Todo::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{
        ActiveValue, DatabaseBackend, DbErr, IntoActiveModel, MockDatabase, MockExecResult,
    };

    use super::{DEFAULT_TEXT, TodoDao, TodoUpdate, new_todo};
    use crate::db::{dao::DaoLayerError, entities::todo};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(id: i32, text: &str) -> todo::Model {
        todo::Model {
            id,
            text: text.to_string(),
            completed: false,
            created: ts(),
            priority: 1,
        }
    }

    #[test]
    fn new_todo_falls_back_to_default_text() {
        let active = new_todo("   ");
        assert_eq!(active.text, ActiveValue::Set(DEFAULT_TEXT.to_string()));
        assert_eq!(active.completed, ActiveValue::Set(false));
        assert_eq!(active.priority, ActiveValue::Set(1));
        assert_eq!(active.id, ActiveValue::NotSet);
    }

    #[test]
    fn new_todo_keeps_surrounding_whitespace() {
        let active = new_todo("  padded  ");
        assert_eq!(active.text, ActiveValue::Set("  padded  ".to_string()));
    }

    #[test]
    fn partial_update_only_touches_present_fields() {
        let mut active = todo_model(3, "Buy milk").into_active_model();
        TodoUpdate {
            completed: Some(true),
            ..Default::default()
        }
        .apply_to(&mut active);

        assert_eq!(active.completed, ActiveValue::Set(true));
        assert_eq!(active.text, ActiveValue::Unchanged("Buy milk".to_string()));
        assert_eq!(active.priority, ActiveValue::Unchanged(1));
        assert_eq!(active.created, ActiveValue::Unchanged(ts()));
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_id() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let found = dao.get(42).await.expect("query should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_returns_none_when_todo_is_missing() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let result = dao
            .update(
                9,
                TodoUpdate {
                    text: Some("new".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_returns_none_when_row_vanishes_before_the_write() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[todo_model(4, "racing")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let result = dao
            .update(
                4,
                TodoUpdate {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("missing row is not an error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_returns_the_written_row() {
        let updated = todo::Model {
            priority: 3,
            ..todo_model(6, "ship it")
        };
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[todo_model(6, "ship it")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[updated.clone()]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let result = dao
            .update(
                6,
                TodoUpdate {
                    priority: Some(3),
                    ..Default::default()
                },
            )
            .await
            .expect("update should succeed");
        assert_eq!(result, Some(updated));
    }

    #[tokio::test]
    async fn empty_update_returns_stored_todo() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[todo_model(5, "keep me")]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let result = dao
            .update(5, TodoUpdate::default())
            .await
            .expect("query should succeed");
        assert_eq!(result, Some(todo_model(5, "keep me")));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let dao = TodoDao::new(&db);

        assert!(dao.delete(1).await.expect("delete should succeed"));
        assert!(!dao.delete(1).await.expect("delete should succeed"));
    }

    #[tokio::test]
    async fn list_all_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("list failed".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.list_all().await.expect_err("list should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
