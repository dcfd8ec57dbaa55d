use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};
use crate::path::EntityId;

/// Simple in-memory store used for testing.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<EntityId, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, id: &EntityId) -> Result<Value, StoreError> {
        self.docs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn save(&self, id: &EntityId, document: &Value) -> Result<(), StoreError> {
        self.docs.write().await.insert(id.clone(), document.clone());
        Ok(())
    }

    async fn remove(&self, id: &EntityId) -> Result<(), StoreError> {
        self.docs
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn exists(&self, id: &EntityId) -> Result<bool, StoreError> {
        Ok(self.docs.read().await.contains_key(id))
    }
}
