//! Attachment upload controller.

use crate::{
    responses::{created, CreatedResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    routing::post,
    Router,
};
use relief_storage::{Blob, BlobDescriptor};
use serde::Deserialize;

/// File name used when the client does not supply one.
const DEFAULT_FILE_NAME: &str = "attachment";

/// Query parameters of an upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub file_name: Option<String>,
}

/// Creates the attachment router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:request_id", post(upload_attachment))
}

/// Store the raw request body as an attachment of a help request.
async fn upload_attachment(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> CreatedResult<BlobDescriptor> {
    let file_name = query
        .file_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

    let mut blob = Blob::new(body.to_vec());
    if let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        blob = blob.with_content_type(content_type);
    }

    let descriptor = state
        .attachment_service
        .upload(&request_id, &file_name, blob)
        .await?;
    created(descriptor)
}
