//! SQLite settings backend.
//!
//! One `settings` table of key/JSON-text pairs, fronted by a read
//! cache so repeated lookups of the same layout key skip the database.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::OptionalExtension;

use super::{SettingsBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, String>,
}

impl SqliteBackend {
    /// Open (and initialize) a settings database at the given path.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        if let Some(cached) = self.cache.get(key) {
            return Ok(Some(cached.clone()));
        }

        let owned_key = key.to_string();
        let json = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT value FROM settings WHERE key = ?",
                    [&owned_key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .await?;

        if let Some(json) = &json {
            self.cache.insert(key.to_string(), json.clone());
        }
        Ok(json)
    }

    async fn set_raw(&self, key: &str, json: String) -> Result<(), SettingsError> {
        let owned_key = key.to_string();
        let owned_json = json.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![owned_key, owned_json],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), json);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let owned_key = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM settings WHERE key = ?", [&owned_key]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }
}
