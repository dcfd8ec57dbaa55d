//! Load, modify and save cycle for path-level reads and writes.
//!
//! Every call is independent: the document is loaded fresh, changed in memory
//! and written back whole. Two concurrent writers to the same entity race and
//! the last save wins.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::accessor::{self, Presence};
use crate::path::{DocPath, EntityId, InvalidId};
use crate::storage::{DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Either the document or the addressed value does not exist.
    #[error("not found")]
    NotFound,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ServiceError::NotFound,
            other => ServiceError::Storage(other),
        }
    }
}

impl From<InvalidId> for ServiceError {
    fn from(err: InvalidId) -> Self {
        ServiceError::MalformedInput(err.to_string())
    }
}

#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    presence: Presence,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            presence: Presence::default(),
        }
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// The whole document for a root path, otherwise the value at `path`.
    pub async fn read(&self, id: &EntityId, path: &DocPath) -> Result<Value, ServiceError> {
        let document = self.store.load(id).await?;
        if path.is_root() {
            return Ok(document);
        }
        accessor::get(&document, path, self.presence)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }

    /// Set `value` at `path`, creating the document if needed. Returns the
    /// updated document.
    pub async fn write(
        &self,
        id: &EntityId,
        path: &DocPath,
        value: Value,
    ) -> Result<Value, ServiceError> {
        if path.is_root() {
            return Err(ServiceError::MalformedInput("empty path".into()));
        }
        let mut document = self.store.load_or_empty(id).await?;
        accessor::set(&mut document, path, value);
        self.store.save(id, &document).await?;
        tracing::info!(%id, %path, "document updated");
        Ok(document)
    }

    /// Remove the value at `path` from an existing document. Returns the
    /// updated document.
    pub async fn remove(&self, id: &EntityId, path: &DocPath) -> Result<Value, ServiceError> {
        if path.is_root() {
            return Err(ServiceError::MalformedInput("empty path".into()));
        }
        let mut document = self.store.load(id).await?;
        if accessor::get(&document, path, self.presence).is_none() {
            return Err(ServiceError::NotFound);
        }
        accessor::delete(&mut document, path);
        self.store.save(id, &document).await?;
        tracing::info!(%id, %path, "document value removed");
        Ok(document)
    }
}
