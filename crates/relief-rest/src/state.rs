//! Application state for Axum handlers.

use relief_service::{
    AttachmentService, HelpRequestService, ResponderService, TaskService, UserService,
};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub help_request_service: Arc<dyn HelpRequestService>,
    pub task_service: Arc<dyn TaskService>,
    pub responder_service: Arc<dyn ResponderService>,
    pub attachment_service: Arc<dyn AttachmentService>,
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        help_request_service: Arc<dyn HelpRequestService>,
        task_service: Arc<dyn TaskService>,
        responder_service: Arc<dyn ResponderService>,
        attachment_service: Arc<dyn AttachmentService>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            help_request_service,
            task_service,
            responder_service,
            attachment_service,
            user_service,
        }
    }
}
