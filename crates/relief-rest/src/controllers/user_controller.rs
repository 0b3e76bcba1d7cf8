//! User profile controller.

use crate::{
    responses::{created, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use relief_service::UserDocument;
use serde_json::Value;

/// Creates the user profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserDocument> {
    let response = state.user_service.get_user(&id).await?;
    ok(response)
}

async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<Value>,
) -> CreatedResult<UserDocument> {
    let response = state.user_service.create_user(data).await?;
    created(response)
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<Value>,
) -> ApiResult<UserDocument> {
    let response = state.user_service.update_user(&id, data).await?;
    ok(response)
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
