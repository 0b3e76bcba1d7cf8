//! JSON document collections stored in SQL.

use crate::{merge_fields, Collection, DatabasePool, Record, RecordMetadata, Store};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relief_core::{ReliefError, ReliefResult};
use serde_json::Value;
use sqlx::FromRow;
use tracing::debug;

/// One document collection, e.g. `help-requests` or `tasks`.
#[derive(Clone)]
pub struct SqlDocumentStore {
    pool: DatabasePool,
    collection: String,
    name: String,
}

impl SqlDocumentStore {
    /// Creates a store for `collection`.
    pub fn new(pool: DatabasePool, collection: impl Into<String>) -> ReliefResult<Self> {
        let collection = collection.into();
        if collection.is_empty() {
            return Err(ReliefError::Configuration(
                "document collection name is required".to_string(),
            ));
        }
        Ok(Self {
            pool,
            name: format!("documents:{}", collection),
            collection,
        })
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// Database row representation of a document.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Record {
    type Error = ReliefError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        Ok(Record {
            data: serde_json::from_str(&row.data)?,
            metadata: RecordMetadata {
                id: row.id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

fn db_error(err: sqlx::Error) -> ReliefError {
    ReliefError::Database(err.to_string())
}

#[async_trait]
impl Store for SqlDocumentStore {
    type Input = Value;
    type Output = Record;

    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, id: &str, input: Value) -> ReliefResult<Record> {
        debug!(collection = %self.collection, id, "Creating document");

        let now = Utc::now();
        let data = serde_json::to_string(&input)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (collection, id) DO UPDATE SET
                data = excluded.data,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.collection)
        .bind(id)
        .bind(data)
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await
        .map_err(db_error)?;

        Ok(Record {
            data: input,
            metadata: RecordMetadata {
                id: id.to_string(),
                created_at: now,
                updated_at: now,
            },
        })
    }

    async fn read(&self, id: &str) -> ReliefResult<Option<Record>> {
        debug!(collection = %self.collection, id, "Reading document");

        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(&self.collection)
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await
        .map_err(db_error)?;

        row.map(Record::try_from).transpose()
    }

    async fn update(&self, id: &str, input: Value) -> ReliefResult<Option<Record>> {
        debug!(collection = %self.collection, id, "Updating document");

        let mut tx = self.pool.inner().begin().await.map_err(db_error)?;

        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data, created_at, updated_at FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(&self.collection)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut record = Record::try_from(row)?;
        merge_fields(&mut record.data, input);
        record.metadata.updated_at = Utc::now();

        sqlx::query(
            "UPDATE documents SET data = ?, updated_at = ? WHERE collection = ? AND id = ?",
        )
        .bind(serde_json::to_string(&record.data)?)
        .bind(record.metadata.updated_at)
        .bind(&self.collection)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> ReliefResult<bool> {
        debug!(collection = %self.collection, id, "Deleting document");

        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(&self.collection)
            .bind(id)
            .execute(self.pool.inner())
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Collection for SqlDocumentStore {
    async fn list(&self) -> ReliefResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, created_at, updated_at
            FROM documents
            WHERE collection = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(&self.collection)
        .fetch_all(self.pool.inner())
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Record::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store(collection: &str) -> SqlDocumentStore {
        let pool = DatabasePool::in_memory().await.unwrap();
        pool.run_migrations().await.unwrap();
        SqlDocumentStore::new(pool, collection).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let store = store("tasks").await;
        let created = store
            .create("task-1", json!({"status": "pending"}))
            .await
            .unwrap();
        assert_eq!(created.metadata.id, "task-1");

        let read = store.read("task-1").await.unwrap().unwrap();
        assert_eq!(read.data, json!({"status": "pending"}));
        assert_eq!(read.metadata.id, "task-1");
    }

    #[tokio::test]
    async fn test_read_missing() {
        let store = store("tasks").await;
        assert!(store.read("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = store("tasks").await;
        store
            .create("task-1", json!({"status": "pending", "notes": "a"}))
            .await
            .unwrap();

        let updated = store
            .update("task-1", json!({"status": "completed"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.data, json!({"status": "completed", "notes": "a"}));
        assert!(updated.metadata.updated_at >= updated.metadata.created_at);

        let read = store.read("task-1").await.unwrap().unwrap();
        assert_eq!(read.data["status"], "completed");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = store("tasks").await;
        assert!(store.update("nope", json!({"a": 1})).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store("tasks").await;
        store.create("task-1", json!({})).await.unwrap();
        assert!(store.delete("task-1").await.unwrap());
        assert!(!store.delete("task-1").await.unwrap());
        assert!(store.read("task-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let pool = DatabasePool::in_memory().await.unwrap();
        pool.run_migrations().await.unwrap();
        let tasks = SqlDocumentStore::new(pool.clone(), "tasks").unwrap();
        let requests = SqlDocumentStore::new(pool, "help-requests").unwrap();

        tasks.create("x", json!({"kind": "task"})).await.unwrap();
        requests.create("y", json!({"kind": "request"})).await.unwrap();

        let listed = tasks.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].metadata.id, "x");
        assert!(requests.read("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_collection_name_rejected() {
        let pool = DatabasePool::in_memory().await.unwrap();
        assert!(SqlDocumentStore::new(pool, "").is_err());
    }
}
