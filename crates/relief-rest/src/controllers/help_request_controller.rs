//! Help request controller.

use crate::{
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use relief_core::HelpRequest;
use relief_service::{
    CreateHelpRequest, HelpRequestCreated, HelpRequestSummary, HelpRequestUpdated,
    UpdateHelpRequest,
};
use tracing::debug;

/// Creates the help request router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/:id", get(get_request).put(update_request))
}

/// Open a new help request.
async fn create_request(
    State(state): State<AppState>,
    Json(request): Json<CreateHelpRequest>,
) -> CreatedResult<HelpRequestCreated> {
    debug!("Create help request from {}", request.name);

    let response = state.help_request_service.create_request(request).await?;
    created(response)
}

/// List help request summaries.
async fn list_requests(State(state): State<AppState>) -> ApiResult<Vec<HelpRequestSummary>> {
    let response = state.help_request_service.list_requests().await?;
    ok(response)
}

/// Get a help request by id.
async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<HelpRequest> {
    let response = state.help_request_service.get_request(&id).await?;
    ok(response)
}

/// Append details or attachments to a help request.
async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateHelpRequest>,
) -> ApiResult<HelpRequestUpdated> {
    debug!("Update help request: {}", id);

    let response = state.help_request_service.update_request(&id, update).await?;
    ok(response)
}
