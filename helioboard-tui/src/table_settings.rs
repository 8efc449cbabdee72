//! Per-table layout persistence.
//!
//! The single namespaced collaborator every table goes through for its
//! layout customization, keyed by table id. Storage failures are logged
//! and never surfaced to the user; malformed entries load as absent.

use sungrid::layout::LayoutSnapshot;

use crate::settings::SettingsProvider;

/// Namespaced access to persisted table layout state.
#[derive(Clone)]
pub struct TableSettings {
    provider: SettingsProvider,
}

impl TableSettings {
    pub fn new(provider: SettingsProvider) -> Self {
        Self { provider }
    }

    fn key(table_id: &str) -> String {
        format!("table.{table_id}.layout")
    }

    /// Load a table's layout snapshot.
    ///
    /// A corrupt or missing entry comes back as `None`; defaults apply.
    pub async fn load(&self, table_id: &str) -> Option<LayoutSnapshot> {
        match self.provider.get(&Self::key(table_id)).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("discarding persisted layout for {table_id}: {err}");
                None
            }
        }
    }

    /// Save a table's layout snapshot. Fire-and-forget semantics: the
    /// caller spawns this and failures only log.
    pub async fn save(&self, table_id: &str, snapshot: &LayoutSnapshot) {
        if let Err(err) = self.provider.set(&Self::key(table_id), snapshot).await {
            log::warn!("failed to persist layout for {table_id}: {err}");
        }
    }

    /// Drop a table's persisted layout.
    pub async fn clear(&self, table_id: &str) {
        if let Err(err) = self.provider.delete(&Self::key(table_id)).await {
            log::warn!("failed to clear persisted layout for {table_id}: {err}");
        }
    }
}
