//! Responder registration and location controller.

use crate::{
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use relief_core::{Location, ResponderKind};
use relief_service::{LocationAck, RegisterResponderRequest, ResponderRegistered};

/// Creates the responder registration and location router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/first-responders", post(register_first_responder))
        .route("/volunteers", post(register_volunteer))
        .route("/:id/location", get(get_location).put(update_location))
}

async fn register_first_responder(
    State(state): State<AppState>,
    Json(request): Json<RegisterResponderRequest>,
) -> CreatedResult<ResponderRegistered> {
    let response = state
        .responder_service
        .register(ResponderKind::FirstResponder, request)
        .await?;
    created(response)
}

async fn register_volunteer(
    State(state): State<AppState>,
    Json(request): Json<RegisterResponderRequest>,
) -> CreatedResult<ResponderRegistered> {
    let response = state
        .responder_service
        .register(ResponderKind::Volunteer, request)
        .await?;
    created(response)
}

async fn update_location(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(location): Json<Location>,
) -> ApiResult<LocationAck> {
    state
        .responder_service
        .update_location(&user_id, location)
        .await?;
    ok(LocationAck::ok())
}

async fn get_location(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Location> {
    let response = state.responder_service.get_location(&user_id).await?;
    ok(response)
}
