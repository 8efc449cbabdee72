//! Data layer errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("table source unavailable: {0}")]
    Unavailable(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}
