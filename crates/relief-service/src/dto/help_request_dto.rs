//! Help request DTOs.

use chrono::{DateTime, Utc};
use relief_core::{Attachment, ChatRoomId, GeoPoint, HelpRequest, RequestId, RequestStatus};
use serde::{Deserialize, Serialize};

/// Request to open a new help request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequest {
    pub name: String,
    pub contact_info: String,
    pub location: GeoPoint,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Acknowledgement of a created help request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestCreated {
    pub request_id: RequestId,
    pub chat_room_id: ChatRoomId,
    pub created_at: DateTime<Utc>,
}

/// Request to append details to an existing help request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHelpRequest {
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub new_attachments: Vec<Attachment>,
}

/// Acknowledgement of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestUpdated {
    pub request_id: RequestId,
    pub updated_at: DateTime<Utc>,
}

/// List entry for a help request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestSummary {
    pub request_id: RequestId,
    pub description: String,
    pub status: RequestStatus,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl From<HelpRequest> for HelpRequestSummary {
    fn from(request: HelpRequest) -> Self {
        Self {
            request_id: request.request_id,
            description: request.description,
            status: request.status,
            attachments: request.attachments,
            created_at: request.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_defaults() {
        let update: UpdateHelpRequest = serde_json::from_str("{}").unwrap();
        assert!(update.additional_info.is_none());
        assert!(update.new_attachments.is_empty());
    }

    #[test]
    fn test_create_request_reads_camel_case() {
        let request: CreateHelpRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "contactInfo": "+94 11 000 0000",
            "location": {"lat": 6.9, "lng": 79.8},
            "description": "Roof collapsed",
        }))
        .unwrap();
        assert_eq!(request.contact_info, "+94 11 000 0000");
        assert!(request.attachments.is_empty());
    }
}
