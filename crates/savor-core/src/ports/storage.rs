//! Object storage port - upload a blob, get back a URL.

use async_trait::async_trait;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path` and return the URL it can be fetched from.
    ///
    /// Uploading to an existing path replaces the object.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}
