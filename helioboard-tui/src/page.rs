//! The generic dashboard page.
//!
//! Every table in the dashboard is an instance of this one parameterized
//! page: a table kind, a resize strategy, and whether headers come from
//! the data source. Behavior differences between the old per-domain
//! pages are configuration, not copies.

use std::sync::Arc;

use helioboard_lib::{DataError, TableKind, TableSource, fetch_with_fallback};
use sungrid::layout::ResetScope;
use sungrid::pipeline::{self, DateFilter, DatePreset, FilterState};
use sungrid::resize::ResizeStrategy;
use sungrid::row::Row;
use sungrid::table::{Table, TableEvent, TableStatus};

use crate::table_settings::TableSettings;

/// Configuration for one dashboard page.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    pub kind: TableKind,
    pub strategy: ResizeStrategy,
    /// Take column descriptors from the source's response instead of
    /// the built-in set for this kind.
    pub headers_from_source: bool,
}

impl PageConfig {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            strategy: ResizeStrategy::Single,
            headers_from_source: false,
        }
    }

    pub fn accordion(mut self) -> Self {
        self.strategy = ResizeStrategy::Accordion;
        self
    }

    pub fn headers_from_source(mut self) -> Self {
        self.headers_from_source = true;
        self
    }
}

/// One mounted table page.
pub struct DashboardPage {
    config: PageConfig,
    table: Table,
    filter: FilterState,
    /// Active date preset, mirrored into `filter.date` on selection.
    date_preset: Option<DatePreset>,
    /// The unfiltered dataset as delivered by the source.
    all_rows: Vec<Row>,
    settings: TableSettings,
    source: Arc<dyn TableSource>,
    loaded: bool,
}

impl DashboardPage {
    pub fn new(config: PageConfig, source: Arc<dyn TableSource>, settings: TableSettings) -> Self {
        let columns = if config.headers_from_source {
            Vec::new()
        } else {
            config.kind.columns()
        };
        Self {
            table: Table::new(columns).with_strategy(config.strategy),
            filter: FilterState::new(config.kind.search_fields()),
            date_preset: None,
            all_rows: Vec::new(),
            config,
            settings,
            source,
            loaded: false,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn search(&self) -> &str {
        &self.filter.search
    }

    pub fn customer_type(&self) -> Option<&str> {
        self.filter.customer_types.iter().next().map(String::as_str)
    }

    pub fn date_preset(&self) -> Option<DatePreset> {
        self.date_preset
    }

    /// Cycle the customer-type facet: off, Residential, Commercial, off.
    pub fn cycle_customer_type(&mut self) {
        let next = match self.customer_type() {
            None => Some("Residential"),
            Some("Residential") => Some("Commercial"),
            Some(_) => None,
        };
        self.filter.customer_types.clear();
        if let Some(value) = next {
            self.filter.customer_types.insert(value.to_string());
        }
        self.refresh();
    }

    /// Cycle the date preset on this table's date field, if it has one.
    pub fn cycle_date_preset(&mut self) {
        let Some(field) = self.config.kind.date_field() else {
            return;
        };
        self.date_preset = match self.date_preset {
            None => Some(DatePreset::Today),
            Some(DatePreset::Today) => Some(DatePreset::ThisWeek),
            Some(DatePreset::ThisWeek) => Some(DatePreset::ThisMonth),
            Some(DatePreset::ThisMonth) => Some(DatePreset::ThisQuarter),
            Some(DatePreset::ThisQuarter) => Some(DatePreset::ThisYear),
            Some(DatePreset::ThisYear) => None,
        };
        let today = chrono::Local::now().date_naive();
        self.filter.date = self.date_preset.map(|preset| DateFilter {
            field: field.to_string(),
            range: preset.resolve(today),
        });
        self.refresh();
    }

    /// Merge the next optional column for this kind into the table.
    ///
    /// Lands immediately before the trailing actions column; a later
    /// "Remove added columns" reset takes it out again. No-op once every
    /// extra is present, or for kinds without extras.
    pub fn add_extra_column(&mut self) -> Option<String> {
        let present = self.table.columns();
        for column in self.config.kind.extra_columns() {
            if present.iter().all(|c| c.key != column.key) {
                let label = column.label.clone();
                self.table.add_column(column);
                self.refresh();
                return Some(label);
            }
        }
        None
    }

    /// Fetch the dataset and rehydrate persisted layout.
    ///
    /// On failure (after the built-in default-kind fallback) the table
    /// shows a persistent inline error and the error is returned for
    /// toasting. There is no retry affordance.
    pub async fn load(&mut self) -> Result<(), DataError> {
        self.table.set_status(TableStatus::Loading);

        let data = match fetch_with_fallback(self.source.as_ref(), self.config.kind).await {
            Ok(data) => data,
            Err(err) => {
                self.table.set_status(TableStatus::Error(err.to_string()));
                return Err(err);
            }
        };

        if self.config.headers_from_source {
            self.table.set_columns(data.columns);
        }
        self.all_rows = data.rows;

        if let Some(snapshot) = self.settings.load(self.config.kind.id()).await {
            self.table.restore(&snapshot);
        }

        self.loaded = true;
        self.refresh();
        Ok(())
    }

    /// Re-run the pipeline and hand the result to the widget.
    ///
    /// Before a successful load there is nothing to derive, and running
    /// anyway would replace a failed load's inline error with an empty
    /// Ready state. The error stays up until a load succeeds.
    pub fn refresh(&self) {
        if !self.loaded {
            return;
        }
        let rows = pipeline::apply(&self.all_rows, &self.filter, &self.table.sort());
        self.table.set_rows(rows);
    }

    pub fn set_search(&mut self, search: String) {
        self.filter.search = search;
        // Unthrottled on purpose: recompute on every keystroke.
        self.refresh();
    }

    /// React to a widget event.
    pub fn on_table_event(&mut self, event: TableEvent) {
        match event {
            TableEvent::SortChanged { .. } => self.refresh(),
            // Width changes mid-drag repaint live; persist on release.
            TableEvent::LayoutChanged => {}
            TableEvent::ResizeFinished => self.persist_layout(),
            TableEvent::RowActivated { id } => {
                log::debug!("row activated on {}: {id}", self.config.kind.id());
            }
        }
    }

    /// Apply a reset scope, honoring its page-level follow-ups.
    pub fn reset(&mut self, scope: ResetScope) {
        let effect = self.table.reset(scope);
        if effect.clear_filters {
            self.filter.clear();
            self.date_preset = None;
        }
        if effect.auto_fit {
            self.table.auto_fit();
        }
        self.refresh();
        if scope == ResetScope::Everything {
            let settings = self.settings.clone();
            let id = self.config.kind.id();
            tokio::spawn(async move { settings.clear(id).await });
        } else {
            self.persist_layout();
        }
    }

    pub fn hide_column(&self, key: &str) {
        self.table.hide_column(key);
        self.persist_layout();
    }

    pub fn set_text_mode(&self, key: &str, mode: Option<sungrid::layout::TextMode>) {
        self.table.set_text_mode(key, mode);
        self.persist_layout();
    }

    /// Persist the current layout snapshot, fire-and-forget.
    pub fn persist_layout(&self) {
        let snapshot = self.table.snapshot();
        let settings = self.settings.clone();
        let id = self.config.kind.id();
        tokio::spawn(async move { settings.save(id, &snapshot).await });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use helioboard_lib::{MockSource, TableData};

    use crate::settings::{MemoryBackend, SettingsProvider};

    struct DownSource;

    #[async_trait]
    impl TableSource for DownSource {
        async fn fetch(&self, _kind: TableKind) -> Result<TableData, DataError> {
            Err(DataError::Unavailable("backend offline".to_string()))
        }
    }

    fn page_with(kind: TableKind, source: impl TableSource + 'static) -> DashboardPage {
        DashboardPage::new(
            PageConfig::new(kind),
            Arc::new(source),
            TableSettings::new(SettingsProvider::new(MemoryBackend::new())),
        )
    }

    #[tokio::test]
    async fn test_failed_load_error_survives_filter_changes() {
        let mut page = page_with(TableKind::Plansets, DownSource);
        assert!(page.load().await.is_err());
        assert!(matches!(page.table().status(), TableStatus::Error(_)));

        // The inline error stays up across every filter interaction;
        // there is no retry affordance to lose.
        page.set_search("solar".to_string());
        page.cycle_customer_type();
        page.cycle_date_preset();
        assert!(matches!(page.table().status(), TableStatus::Error(_)));
        assert!(!page.is_loaded());
    }

    #[tokio::test]
    async fn test_successful_load_clears_a_previous_error() {
        let mut page = page_with(TableKind::Plansets, DownSource);
        assert!(page.load().await.is_err());

        page.source = Arc::new(MockSource::new(7));
        page.load().await.unwrap();
        assert_eq!(page.table().status(), TableStatus::Ready);
        assert!(page.is_loaded());
    }

    #[tokio::test]
    async fn test_extra_column_merges_once_before_actions() {
        let mut page = page_with(TableKind::Plansets, MockSource::new(7));
        page.load().await.unwrap();

        assert_eq!(page.add_extra_column().as_deref(), Some("Customer Type"));
        let keys: Vec<String> = page
            .table()
            .columns()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        let type_pos = keys.iter().position(|k| k == "customer_type");
        let actions_pos = keys.iter().position(|k| k == "__actions");
        assert!(type_pos < actions_pos && type_pos.is_some());

        // Every extra is present now; repeated adds are no-ops.
        assert_eq!(page.add_extra_column(), None);
    }

    #[tokio::test]
    async fn test_kinds_without_extras_add_nothing() {
        let mut page = page_with(TableKind::Garage, MockSource::new(7));
        page.load().await.unwrap();
        assert_eq!(page.add_extra_column(), None);
    }
}
