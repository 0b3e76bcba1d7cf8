//! Help request service trait definition.

use crate::dto::{
    CreateHelpRequest, HelpRequestCreated, HelpRequestSummary, HelpRequestUpdated,
    UpdateHelpRequest,
};
use async_trait::async_trait;
use relief_core::{HelpRequest, Interface, ReliefResult};

/// Help request service trait.
#[async_trait]
pub trait HelpRequestService: Interface + Send + Sync {
    /// Opens a new help request.
    async fn create_request(&self, request: CreateHelpRequest) -> ReliefResult<HelpRequestCreated>;

    /// Lists every help request.
    async fn list_requests(&self) -> ReliefResult<Vec<HelpRequestSummary>>;

    /// Gets a help request by id.
    async fn get_request(&self, id: &str) -> ReliefResult<HelpRequest>;

    /// Appends history and/or attachments to a help request.
    async fn update_request(
        &self,
        id: &str,
        update: UpdateHelpRequest,
    ) -> ReliefResult<HelpRequestUpdated>;
}
