//! Data source behavior: mock determinism and the fallback path.

use async_trait::async_trait;
use helioboard_lib::{
    DataError, MockSource, TableData, TableKind, TableSource, fetch_with_fallback,
};

struct FailingSource {
    fail_kind: TableKind,
    inner: MockSource,
}

#[async_trait]
impl TableSource for FailingSource {
    async fn fetch(&self, kind: TableKind) -> Result<TableData, DataError> {
        if kind == self.fail_kind {
            return Err(DataError::Unavailable(format!("{kind} is down")));
        }
        self.inner.fetch(kind).await
    }
}

#[tokio::test]
async fn test_mock_source_delivers_headers_and_rows() {
    let source = MockSource::new(7);
    for kind in TableKind::ALL {
        let data = source.fetch(kind).await.unwrap();
        assert_eq!(data.columns, kind.columns());
        assert_eq!(data.rows.len(), 24);
    }
}

#[tokio::test]
async fn test_mock_source_is_deterministic_per_seed() {
    let a = MockSource::new(7).fetch(TableKind::Garage).await.unwrap();
    let b = MockSource::new(7).fetch(TableKind::Garage).await.unwrap();
    assert_eq!(a.rows, b.rows);

    let c = MockSource::new(8).fetch(TableKind::Garage).await.unwrap();
    assert_ne!(a.rows, c.rows);
}

#[tokio::test]
async fn test_planset_rows_omit_missing_cost_and_date() {
    // The generator leaves some costs and install dates absent; those
    // fields must read as null rather than a zero value.
    let data = MockSource::new(7).fetch(TableKind::Plansets).await.unwrap();
    for row in &data.rows {
        let cost = row.get("cost");
        assert!(cost.is_null() || row.display("cost").starts_with('$'));
        let date = row.get("install_date");
        assert!(date.is_null() || row.display("install_date").len() == 10);
    }
}

#[tokio::test]
async fn test_fallback_retries_default_kind_once() {
    let source = FailingSource {
        fail_kind: TableKind::Garage,
        inner: MockSource::new(7),
    };

    let data = fetch_with_fallback(&source, TableKind::Garage).await.unwrap();
    // Fallback delivered the default table instead.
    assert_eq!(data.columns, TableKind::default().columns());
}

#[tokio::test]
async fn test_fallback_gives_up_when_default_kind_fails() {
    let source = FailingSource {
        fail_kind: TableKind::default(),
        inner: MockSource::new(7),
    };

    let err = fetch_with_fallback(&source, TableKind::default()).await.unwrap_err();
    assert!(matches!(err, DataError::Unavailable(_)));
}

#[test]
fn test_table_kind_ids_round_trip() {
    for kind in TableKind::ALL {
        assert_eq!(TableKind::from_id(kind.id()), Some(kind));
    }
    assert_eq!(TableKind::from_id("bogus"), None);
}
