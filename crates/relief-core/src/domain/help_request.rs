//! Help request raised by people affected by a disaster.

use super::{Attachment, GeoPoint};
use crate::{ChatRoomId, ReliefError, ReliefResult, RequestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a help request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

/// Additional details appended to a request after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetails {
    pub additional_info: String,
}

/// One entry of a request's audit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: UpdateDetails,
}

/// A help request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub request_id: RequestId,
    pub chat_room_id: ChatRoomId,
    pub name: String,
    pub contact_info: String,
    pub location: GeoPoint,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl HelpRequest {
    /// Creates a new pending request with fresh request and chat room ids.
    #[must_use]
    pub fn new(
        name: String,
        contact_info: String,
        location: GeoPoint,
        description: String,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            chat_room_id: ChatRoomId::new(),
            name,
            contact_info,
            location,
            description,
            attachments,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            history: Vec::new(),
        }
    }

    /// Appends additional information and/or attachments.
    ///
    /// At least one of the two must be present.
    pub fn apply_update(
        &mut self,
        additional_info: Option<String>,
        new_attachments: Vec<Attachment>,
        now: DateTime<Utc>,
    ) -> ReliefResult<()> {
        let additional_info = additional_info.filter(|info| !info.is_empty());
        if additional_info.is_none() && new_attachments.is_empty() {
            return Err(ReliefError::validation(
                "either additionalInfo or newAttachments is required",
            ));
        }

        if let Some(additional_info) = additional_info {
            self.history.push(HistoryEntry {
                kind: "update".to_string(),
                data: UpdateDetails { additional_info },
            });
        }
        self.attachments.extend(new_attachments);
        self.updated_at = Some(now);
        Ok(())
    }
}
