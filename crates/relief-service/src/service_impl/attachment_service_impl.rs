//! Attachment service implementation.

use crate::attachment_service::AttachmentService;
use async_trait::async_trait;
use relief_core::{ReliefError, ReliefResult};
use relief_storage::{Blob, BlobDescriptor, BlobStore, DocumentCollection, LoggedStore, Store};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Stores attachments under `help-requests/<requestId>` of the blob root.
pub struct AttachmentServiceImpl {
    requests: Arc<dyn DocumentCollection>,
    blob_root: PathBuf,
    public_url: String,
}

impl AttachmentServiceImpl {
    pub fn new(
        requests: Arc<dyn DocumentCollection>,
        blob_root: impl Into<PathBuf>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            requests,
            blob_root: blob_root.into(),
            public_url: public_url.into(),
        }
    }

    fn folder(&self, request_id: &str) -> ReliefResult<LoggedStore<BlobStore>> {
        let store = BlobStore::new(
            &self.blob_root,
            format!("help-requests/{}", request_id),
            &self.public_url,
        )?;
        Ok(LoggedStore::new(store))
    }
}

#[async_trait]
impl AttachmentService for AttachmentServiceImpl {
    async fn upload(
        &self,
        request_id: &str,
        file_name: &str,
        blob: Blob,
    ) -> ReliefResult<BlobDescriptor> {
        if self.requests.read(request_id).await?.is_none() {
            return Err(ReliefError::not_found("HelpRequest", request_id));
        }

        let descriptor = self.folder(request_id)?.create(file_name, blob).await?;
        info!(request_id, blob = %descriptor.name, "Attachment stored");
        Ok(descriptor)
    }
}
