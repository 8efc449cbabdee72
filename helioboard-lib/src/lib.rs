//! Domain data layer for the helioboard dashboard.
//!
//! Table kinds, domain records and their engine-row conversions, the
//! asynchronous `TableSource` boundary, and a seeded mock source.

pub mod error;
pub mod mock;
pub mod model;
pub mod source;

pub use error::DataError;
pub use mock::MockSource;
pub use model::{Employee, GarageItem, Planset, TableKind, TeamMember};
pub use source::{TableData, TableSource, fetch_with_fallback};
