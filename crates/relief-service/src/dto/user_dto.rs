//! User DTOs.

use chrono::{DateTime, Utc};
use relief_storage::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user profile with its store metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record> for UserDocument {
    fn from(record: Record) -> Self {
        Self {
            id: record.metadata.id,
            data: record.data,
            created_at: record.metadata.created_at,
            updated_at: record.metadata.updated_at,
        }
    }
}
