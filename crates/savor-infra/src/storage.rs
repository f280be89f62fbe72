//! Object storage on the local filesystem, served from a public base URL.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use savor_core::ports::{ObjectStorage, StorageError};

#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    /// Directory objects are written under.
    pub root: PathBuf,
    /// URL prefix the root directory is served from.
    pub public_base_url: String,
}

impl LocalStorageConfig {
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./storage")),
            public_base_url: std::env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/media".to_string()),
        }
    }
}

pub struct LocalObjectStorage {
    config: LocalStorageConfig,
}

impl LocalObjectStorage {
    pub fn new(config: LocalStorageConfig) -> Self {
        Self { config }
    }

    /// Resolve `path` under the root, refusing anything that escapes it.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let normal = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !normal {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.config.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Upload(e.to_string()))?;
        }

        let size = bytes.len();
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        tracing::debug!(path = %path, size, content_type = %content_type, "Object stored");
        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            path
        ))
    }
}
