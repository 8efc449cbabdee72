//! Settings system for typed key-value storage.
//!
//! Every persisted value is a JSON document under a string key, the
//! shape the dashboard's layout state has always been stored in, so the
//! storage trait deals in JSON text rather than opaque bytes and the
//! database stays hand-inspectable.

mod memory;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
}

/// Storage for JSON-valued settings.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// The raw JSON stored under a key, if any.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store raw JSON under a key, replacing any previous value.
    async fn set_raw(&self, key: &str, json: String) -> Result<(), SettingsError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), SettingsError>;
}

/// Typed settings provider.
///
/// Wraps a `SettingsBackend` with typed serde_json conversion.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_raw(key).await? {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let json = serde_json::to_string(value).map_err(SettingsError::Serialization)?;
        self.backend.set_raw(key, json).await
    }

    /// Delete a key.
    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(key).await
    }
}
