use crate::db::DbActorHandle;
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Fixed key of the serialized [`Session`](crate::types::Session).
pub const SESSION_STORAGE_KEY: &str = "aquasync.session";

/// Fixed key of the bare bearer token, kept alongside the session.
pub const TOKEN_STORAGE_KEY: &str = "aquasync.token";

/// Durable key/value storage used by the session store.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn save(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl SessionStorage for DbActorHandle {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get(key).await
    }

    async fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.delete(key).await
    }
}

/// Process-local storage; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.values.lock().await.clone()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}
