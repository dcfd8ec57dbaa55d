//! Filesystem store: one pretty-printed `<id>.json` per entity in a flat directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::{DocumentStore, StoreError};
use crate::path::EntityId;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, id: &EntityId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, id: &EntityId) -> Result<Value, StoreError> {
        let path = self.path(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.clone()));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(%id, bytes = bytes.len(), "loaded document");
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json { path, source })
    }

    async fn save(&self, id: &EntityId, document: &Value) -> Result<(), StoreError> {
        // the directory may have been removed underneath a running server
        self.ensure_dir().await?;
        let path = self.path(id);
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, &bytes)
            .await
            .map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(%id, bytes = bytes.len(), "saved document");
        Ok(())
    }

    async fn remove(&self, id: &EntityId) -> Result<(), StoreError> {
        let path = self.path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id.clone())),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn exists(&self, id: &EntityId) -> Result<bool, StoreError> {
        let path = self.path(id);
        fs::try_exists(&path)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}
