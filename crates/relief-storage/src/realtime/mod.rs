//! Path-addressed realtime store over a key/value backend.
//!
//! Values live at `<prefix>:<base_path>/<id>` and are kept in an envelope
//! that carries the store-maintained timestamps next to the payload.

mod memory;
mod redis;

pub use self::memory::MemoryKeyValue;
pub use self::redis::RedisKeyValue;

use crate::{merge_fields, Record, RecordMetadata, Store};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relief_core::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Minimal key/value backend behind the realtime store.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> ReliefResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> ReliefResult<()>;
    async fn delete(&self, key: &str) -> ReliefResult<bool>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    data: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Realtime store rooted at one base path, e.g. `userLocations`.
#[derive(Clone)]
pub struct RealtimeStore {
    backend: Arc<dyn KeyValueBackend>,
    prefix: String,
    base_path: String,
    name: String,
}

impl RealtimeStore {
    /// Creates a store rooted at `base_path`.
    pub fn new(
        backend: Arc<dyn KeyValueBackend>,
        prefix: impl Into<String>,
        base_path: impl Into<String>,
    ) -> ReliefResult<Self> {
        let base_path = base_path.into();
        if base_path.is_empty() {
            return Err(ReliefError::Configuration(
                "realtime base path is required".to_string(),
            ));
        }
        Ok(Self {
            backend,
            prefix: prefix.into(),
            name: format!("realtime:{}", base_path),
            base_path,
        })
    }

    fn key(&self, id: &str) -> String {
        format!("{}:{}/{}", self.prefix, self.base_path, id)
    }

    async fn load(&self, key: &str) -> ReliefResult<Option<Envelope>> {
        match self.backend.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, envelope: &Envelope) -> ReliefResult<()> {
        let raw = serde_json::to_string(envelope)?;
        self.backend.set(key, &raw).await
    }
}

fn into_record(id: &str, envelope: Envelope) -> Record {
    Record {
        data: envelope.data,
        metadata: RecordMetadata {
            id: id.to_string(),
            created_at: envelope.created_at,
            updated_at: envelope.updated_at,
        },
    }
}

#[async_trait]
impl Store for RealtimeStore {
    type Input = Value;
    type Output = Record;

    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, id: &str, input: Value) -> ReliefResult<Record> {
        let key = self.key(id);
        debug!(key = %key, "Setting realtime value");

        let now = Utc::now();
        let envelope = Envelope {
            data: input,
            created_at: now,
            updated_at: now,
        };
        self.save(&key, &envelope).await?;
        Ok(into_record(id, envelope))
    }

    async fn read(&self, id: &str) -> ReliefResult<Option<Record>> {
        let key = self.key(id);
        Ok(self.load(&key).await?.map(|envelope| into_record(id, envelope)))
    }

    async fn update(&self, id: &str, input: Value) -> ReliefResult<Option<Record>> {
        let key = self.key(id);
        debug!(key = %key, "Updating realtime value");

        let now = Utc::now();
        let envelope = match self.load(&key).await? {
            Some(mut existing) => {
                merge_fields(&mut existing.data, input);
                existing.updated_at = now;
                existing
            }
            None => Envelope {
                data: input,
                created_at: now,
                updated_at: now,
            },
        };
        self.save(&key, &envelope).await?;
        Ok(Some(into_record(id, envelope)))
    }

    async fn delete(&self, id: &str) -> ReliefResult<bool> {
        self.backend.delete(&self.key(id)).await
    }
}
