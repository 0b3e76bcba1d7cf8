//! Help request service implementation.

use crate::dto::{
    CreateHelpRequest, HelpRequestCreated, HelpRequestSummary, HelpRequestUpdated,
    UpdateHelpRequest,
};
use crate::help_request_service::HelpRequestService;
use async_trait::async_trait;
use chrono::Utc;
use relief_core::{HelpRequest, ReliefError, ReliefResult};
use relief_storage::DocumentCollection;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Collection holding help request documents.
pub const HELP_REQUESTS_COLLECTION: &str = "help-requests";

/// Help request service backed by a document collection.
pub struct HelpRequestServiceImpl {
    requests: Arc<dyn DocumentCollection>,
}

impl HelpRequestServiceImpl {
    pub fn new(requests: Arc<dyn DocumentCollection>) -> Self {
        Self { requests }
    }

    async fn load(&self, id: &str) -> ReliefResult<HelpRequest> {
        self.requests
            .read(id)
            .await?
            .ok_or_else(|| ReliefError::not_found("HelpRequest", id))?
            .parse()
    }
}

#[async_trait]
impl HelpRequestService for HelpRequestServiceImpl {
    async fn create_request(&self, request: CreateHelpRequest) -> ReliefResult<HelpRequestCreated> {
        let help_request = HelpRequest::new(
            request.name,
            request.contact_info,
            request.location,
            request.description,
            request.attachments,
        );

        self.requests
            .create(
                help_request.request_id.as_str(),
                serde_json::to_value(&help_request)?,
            )
            .await?;

        info!(request_id = %help_request.request_id, "Help request created");
        Ok(HelpRequestCreated {
            request_id: help_request.request_id,
            chat_room_id: help_request.chat_room_id,
            created_at: help_request.created_at,
        })
    }

    async fn list_requests(&self) -> ReliefResult<Vec<HelpRequestSummary>> {
        debug!("Listing help requests");

        self.requests
            .list()
            .await?
            .iter()
            .map(|record| record.parse::<HelpRequest>().map(HelpRequestSummary::from))
            .collect()
    }

    async fn get_request(&self, id: &str) -> ReliefResult<HelpRequest> {
        debug!(request_id = id, "Getting help request");
        self.load(id).await
    }

    async fn update_request(
        &self,
        id: &str,
        update: UpdateHelpRequest,
    ) -> ReliefResult<HelpRequestUpdated> {
        let mut help_request = self.load(id).await?;

        let now = Utc::now();
        help_request.apply_update(update.additional_info, update.new_attachments, now)?;

        let patch = json!({
            "history": help_request.history,
            "attachments": help_request.attachments,
            "updatedAt": now,
        });
        self.requests
            .update(id, patch)
            .await?
            .ok_or_else(|| ReliefError::not_found("HelpRequest", id))?;

        info!(request_id = id, "Help request updated");
        Ok(HelpRequestUpdated {
            request_id: help_request.request_id,
            updated_at: now,
        })
    }
}
