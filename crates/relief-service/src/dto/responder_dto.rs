//! Responder DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a first responder or volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponderRequest {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub contact: String,
}

/// Acknowledgement of a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderRegistered {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement of a location write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAck {
    pub status: String,
}

impl LocationAck {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
