//! Persistence of whole documents keyed by [`EntityId`].
//!
//! A store only loads and saves complete documents; path-level changes are
//! applied in memory by the caller between a load and a save.

pub mod file;
pub mod memory;


use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::path::EntityId;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document `{0}` not found")]
    NotFound(EntityId),

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Backend holding one JSON document per entity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch and parse the document, failing with [`StoreError::NotFound`] if absent.
    async fn load(&self, id: &EntityId) -> Result<Value, StoreError>;

    /// Overwrite the document, creating it if needed.
    async fn save(&self, id: &EntityId, document: &Value) -> Result<(), StoreError>;

    /// Drop the whole document.
    async fn remove(&self, id: &EntityId) -> Result<(), StoreError>;

    async fn exists(&self, id: &EntityId) -> Result<bool, StoreError>;

    /// Like [`load`](Self::load) but an absent document starts out as `{}`.
    async fn load_or_empty(&self, id: &EntityId) -> Result<Value, StoreError> {
        match self.load(id).await {
            Err(StoreError::NotFound(_)) => Ok(Value::Object(Map::new())),
            other => other,
        }
    }
}
