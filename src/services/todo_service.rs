use crate::{
    db::{
        dao::{TodoDao, TodoUpdate},
        entities::todo,
    },
    error::AppError,
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn list(&self) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.list_all().await?)
    }

    pub async fn require(&self, id: i64) -> Result<todo::Model, AppError> {
        let Some(key) = store_key(id) else {
            return Err(not_found(id));
        };
        self.todo_dao.get(key).await?.ok_or_else(|| not_found(id))
    }

    /// Blank or missing text is stored as the default placeholder.
    pub async fn create(&self, text: Option<&str>) -> Result<todo::Model, AppError> {
        let todo = self.todo_dao.create(text.unwrap_or_default()).await?;
        tracing::debug!(id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn update(&self, id: i64, changes: TodoUpdate) -> Result<todo::Model, AppError> {
        if changes
            .text
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            return Err(AppError::bad_request("text must not be empty"));
        }
        let Some(key) = store_key(id) else {
            return Err(not_found(id));
        };
        self.todo_dao
            .update(key, changes)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deleting a missing todo is a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let removed = match store_key(id) {
            Some(key) => self.todo_dao.delete(key).await?,
            None => false,
        };
        if !removed {
            tracing::debug!(id, "delete of missing todo ignored");
        }
        Ok(())
    }
}

/// Ids outside the column's range cannot exist in the store.
fn store_key(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Todo {id} not found"))
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};

    use super::TodoService;
    use crate::{
        db::{
            dao::{DaoContext, TodoUpdate},
            entities::todo,
        },
        error::AppError,
    };

    fn service(db: &DatabaseConnection) -> TodoService {
        TodoService::new(DaoContext::new(db).todo())
    }

    #[tokio::test]
    async fn require_maps_missing_todo_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = service(&db).require(11).await.expect_err("todo is missing");
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.message(), "Todo 11 not found");
    }

    #[tokio::test]
    async fn out_of_range_ids_are_not_found_without_a_query() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let service = service(&db);
        let id = i64::from(i32::MAX) + 1;

        let err = service.require(id).await.expect_err("id cannot exist");
        assert_eq!(err.message(), format!("Todo {id} not found"));

        let err = service
            .update(
                id,
                TodoUpdate {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect_err("id cannot exist");
        assert!(matches!(err, AppError::NotFound(_)));

        service.delete(id).await.expect("delete should be a no-op");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_blank_text_before_touching_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let err = service(&db)
            .update(
                1,
                TodoUpdate {
                    text: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("blank text should be rejected");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_todo_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        service(&db).delete(99).await.expect("delete should be a no-op");
    }

    #[tokio::test]
    async fn storage_failures_surface_as_internal_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("db is gone".to_string())])
            .into_connection();

        let err = service(&db).list().await.expect_err("list should fail");
        assert!(matches!(err, AppError::Internal(_)));
    }
}
