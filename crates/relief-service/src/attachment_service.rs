//! Attachment service trait definition.

use async_trait::async_trait;
use relief_core::{Interface, ReliefResult};
use relief_storage::{Blob, BlobDescriptor};

/// Stores media for help requests.
#[async_trait]
pub trait AttachmentService: Interface + Send + Sync {
    /// Stores `blob` in the folder of `request_id`.
    ///
    /// Fails with not found if the help request does not exist.
    async fn upload(
        &self,
        request_id: &str,
        file_name: &str,
        blob: Blob,
    ) -> ReliefResult<BlobDescriptor>;
}
