//! Website collection operations for sitenav.
//!
//! [`Catalog`] wraps a [`RecordStore`](sitenav_store::RecordStore) and exposes
//! the list/create/update/delete/reorder/import/export operations. Each
//! mutation is a read-modify-write of the full snapshot; records are
//! addressed by name, and the first record with a matching name wins.

pub mod catalog;
pub mod error;
pub mod reorder;
pub mod request;
pub mod validation;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use reorder::reorder_records;
pub use request::{NewWebsite, WebsiteUpdate};
pub use validation::{ensure_unique_names, parse_import, parse_order, validate_name};
