//! In-memory settings backend.
//!
//! Fallback when the settings database cannot be opened; customization
//! then lasts for the session only. Also used by tests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

#[derive(Default)]
pub struct MemoryBackend {
    store: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.store.get(key).map(|v| v.clone()))
    }

    async fn set_raw(&self, key: &str, json: String) -> Result<(), SettingsError> {
        self.store.insert(key.to_string(), json);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.store.remove(key);
        Ok(())
    }
}
