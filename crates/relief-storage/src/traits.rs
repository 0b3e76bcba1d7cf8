//! The storage capability shared by every backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relief_core::ReliefResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CRUD over an opaque string id.
///
/// `Input` is what callers write, `Output` is what the backend hands back
/// after each successful operation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Payload accepted by `create` and `update`.
    type Input: Send + 'static;
    /// Value returned by the store.
    type Output: Send + 'static;

    /// Human-readable name used in logs and errors, e.g. `documents:tasks`.
    fn name(&self) -> &str;

    /// Creates (or overwrites) the entry at `id`.
    async fn create(&self, id: &str, input: Self::Input) -> ReliefResult<Self::Output>;

    /// Reads the entry at `id`; `None` if absent.
    async fn read(&self, id: &str) -> ReliefResult<Option<Self::Output>>;

    /// Updates the entry at `id`.
    ///
    /// Backends differ on missing entries: documents and blobs return `None`,
    /// the realtime store creates the entry.
    async fn update(&self, id: &str, input: Self::Input) -> ReliefResult<Option<Self::Output>>;

    /// Deletes the entry at `id`. Returns true if something was removed.
    async fn delete(&self, id: &str) -> ReliefResult<bool>;
}

/// A store whose entries can be enumerated.
#[async_trait]
pub trait Collection: Store {
    /// Returns every entry, oldest first.
    async fn list(&self) -> ReliefResult<Vec<Self::Output>>;
}

/// Object-safe alias for JSON document collections.
pub trait DocumentCollection: Collection<Input = Value, Output = Record> {}

impl<T> DocumentCollection for T where T: Collection<Input = Value, Output = Record> {}

/// Timestamps and identity maintained by the store itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored JSON document together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Value,
    pub metadata: RecordMetadata,
}

impl Record {
    /// Deserializes the document body into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> ReliefResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Merges top-level fields of `patch` into `target`.
///
/// Non-object values replace the target wholesale.
pub fn merge_fields(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(existing), Value::Object(fields)) => {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_fields_overwrites_and_keeps() {
        let mut doc = json!({"status": "pending", "notes": "", "history": []});
        merge_fields(&mut doc, json!({"status": "completed", "updatedAt": "now"}));
        assert_eq!(
            doc,
            json!({"status": "completed", "notes": "", "history": [], "updatedAt": "now"})
        );
    }

    #[test]
    fn test_merge_fields_replaces_scalars() {
        let mut doc = json!(1);
        merge_fields(&mut doc, json!({"a": 1}));
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn test_record_parse() {
        #[derive(Deserialize)]
        struct Doc {
            name: String,
        }

        let now = Utc::now();
        let record = Record {
            data: json!({"name": "shelter"}),
            metadata: RecordMetadata {
                id: "a".to_string(),
                created_at: now,
                updated_at: now,
            },
        };
        let doc: Doc = record.parse().unwrap();
        assert_eq!(doc.name, "shelter");
    }
}
