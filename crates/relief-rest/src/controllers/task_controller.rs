//! Task controller.

use crate::{
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use relief_core::TaskChanges;
use relief_service::{CreateTaskRequest, TaskCreated, TaskDetail, TaskSummary, TaskUpdated};
use tracing::debug;

/// Creates the task router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).put(update_task))
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> CreatedResult<TaskCreated> {
    debug!("Create task for request {}", request.request_id);

    let response = state.task_service.create_task(request).await?;
    created(response)
}

async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<TaskSummary>> {
    let response = state.task_service.list_tasks().await?;
    ok(response)
}

async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TaskDetail> {
    let response = state.task_service.get_task(&id).await?;
    ok(response)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<TaskChanges>,
) -> ApiResult<TaskUpdated> {
    debug!("Update task: {}", id);

    let response = state.task_service.update_task(&id, changes).await?;
    ok(response)
}
