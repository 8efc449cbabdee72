//! The data source boundary.

use async_trait::async_trait;
use sungrid::column::Column;
use sungrid::row::Row;

use crate::error::DataError;
use crate::model::TableKind;

/// Headers and rows for one table, as delivered by a source.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

/// Asynchronous provider of table data.
///
/// One request is in flight per page mount. Requests racing a rapid
/// table-kind switch are neither cancelled nor deduplicated; a slow
/// earlier response can land after a later one (known limitation,
/// inherited from the original dashboard).
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch(&self, kind: TableKind) -> Result<TableData, DataError>;
}

/// Fetch a table, falling back to the default kind once on failure.
///
/// The failure is logged; if the fallback also fails, that error is
/// returned and the caller shows a persistent inline error.
pub async fn fetch_with_fallback(
    source: &dyn TableSource,
    kind: TableKind,
) -> Result<TableData, DataError> {
    match source.fetch(kind).await {
        Ok(data) => Ok(data),
        Err(err) if kind != TableKind::default() => {
            log::warn!("fetch for {kind} failed ({err}), falling back to default table");
            source.fetch(TableKind::default()).await
        }
        Err(err) => Err(err),
    }
}
