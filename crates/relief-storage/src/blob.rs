//! Folder-scoped blob storage on the local filesystem.

use crate::Store;
use async_trait::async_trait;
use chrono::Utc;
use relief_core::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// Raw blob payload.
#[derive(Debug, Clone)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Where a stored blob lives and how to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobDescriptor {
    /// `<millis>-<random>` prefix of the stored name.
    pub id: String,
    /// Stored file name, `<id>-<original name>`.
    pub name: String,
    /// `<folder>/<name>`.
    pub path: String,
    pub download_url: String,
}

/// Stores blobs under `<root>/<folder>`.
///
/// `create` takes the caller's file name as its id and returns the unique
/// stored name; `read`, `update` and `delete` address blobs by stored name.
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
    folder: String,
    public_base_url: String,
    name: String,
}

impl BlobStore {
    pub fn new(
        root: impl Into<PathBuf>,
        folder: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> ReliefResult<Self> {
        let folder = folder.into();
        if folder.is_empty() {
            return Err(ReliefError::Configuration(
                "blob folder is required".to_string(),
            ));
        }
        let root = root.into();
        Ok(Self {
            dir: root.join(&folder),
            name: format!("blobs:{}", folder),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            folder,
        })
    }

    /// Reads the stored bytes of a blob.
    pub async fn read_bytes(&self, name: &str) -> ReliefResult<Option<Vec<u8>>> {
        check_name(name)?;
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn describe(&self, name: &str) -> BlobDescriptor {
        let path = format!("{}/{}", self.folder, name);
        BlobDescriptor {
            id: blob_id(name),
            name: name.to_string(),
            download_url: format!("{}/{}", self.public_base_url, path),
            path,
        }
    }

    async fn exists(&self, name: &str) -> ReliefResult<bool> {
        tokio::fs::try_exists(self.dir.join(name))
            .await
            .map_err(io_error)
    }
}

/// Rejects names that would escape the folder.
fn check_name(name: &str) -> ReliefResult<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ReliefError::validation(format!(
            "invalid blob name '{}'",
            name
        )));
    }
    Ok(())
}

fn blob_id(name: &str) -> String {
    name.splitn(3, '-').take(2).collect::<Vec<_>>().join("-")
}

fn io_error(err: std::io::Error) -> ReliefError {
    ReliefError::Internal(format!("blob I/O failed: {}", err))
}

#[async_trait]
impl Store for BlobStore {
    type Input = Blob;
    type Output = BlobDescriptor;

    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, file_name: &str, blob: Blob) -> ReliefResult<BlobDescriptor> {
        check_name(file_name)?;

        let unique_id = format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple());
        let stored_name = format!("{}-{}", unique_id, file_name);

        if self.exists(&stored_name).await? {
            warn!(blob = %stored_name, "Blob already exists, returning existing descriptor");
            return Ok(self.describe(&stored_name));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(io_error)?;
        tokio::fs::write(self.dir.join(&stored_name), &blob.bytes)
            .await
            .map_err(io_error)?;

        info!(
            blob = %stored_name,
            size = blob.bytes.len(),
            content_type = blob.content_type.as_deref().unwrap_or("application/octet-stream"),
            "Blob stored"
        );
        Ok(self.describe(&stored_name))
    }

    async fn read(&self, name: &str) -> ReliefResult<Option<BlobDescriptor>> {
        check_name(name)?;
        if !self.exists(name).await? {
            return Ok(None);
        }
        Ok(Some(self.describe(name)))
    }

    async fn update(&self, name: &str, blob: Blob) -> ReliefResult<Option<BlobDescriptor>> {
        check_name(name)?;
        if !self.exists(name).await? {
            return Ok(None);
        }

        tokio::fs::write(self.dir.join(name), &blob.bytes)
            .await
            .map_err(io_error)?;
        info!(blob = name, "Blob updated");
        Ok(Some(self.describe(name)))
    }

    async fn delete(&self, name: &str) -> ReliefResult<bool> {
        check_name(name)?;
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => {
                info!(blob = name, "Blob deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(root: &std::path::Path) -> BlobStore {
        BlobStore::new(root, "attachments", "http://localhost:3000/files/").unwrap()
    }

    #[tokio::test]
    async fn test_create_writes_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let descriptor = store
            .create("photo.jpg", Blob::new(b"jpeg".to_vec()).with_content_type("image/jpeg"))
            .await
            .unwrap();

        assert!(descriptor.name.ends_with("-photo.jpg"));
        assert_eq!(descriptor.name, format!("{}-photo.jpg", descriptor.id));
        assert_eq!(descriptor.path, format!("attachments/{}", descriptor.name));
        assert_eq!(
            descriptor.download_url,
            format!("http://localhost:3000/files/{}", descriptor.path)
        );
        assert_eq!(
            store.read_bytes(&descriptor.name).await.unwrap().unwrap(),
            b"jpeg"
        );
    }

    #[tokio::test]
    async fn test_missing_blob_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        assert!(store.read("1-a-missing.txt").await.unwrap().is_none());
        assert!(store
            .update("1-a-missing.txt", Blob::new(b"x".to_vec()))
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete("1-a-missing.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let created = store.create("notes.txt", Blob::new(b"v1".to_vec())).await.unwrap();

        let updated = store
            .update(&created.name, Blob::new(b"v2".to_vec()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
        assert_eq!(store.read_bytes(&created.name).await.unwrap().unwrap(), b"v2");

        assert!(store.delete(&created.name).await.unwrap());
        assert!(store.read(&created.name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(matches!(
            store.create("../escape", Blob::new(Vec::new())).await,
            Err(ReliefError::Validation(_))
        ));
        assert!(matches!(
            store.read("a/b").await,
            Err(ReliefError::Validation(_))
        ));
    }

    #[test]
    fn test_blob_id_is_two_leading_segments() {
        assert_eq!(blob_id("1700000000000-abc-my-file.png"), "1700000000000-abc");
    }
}
