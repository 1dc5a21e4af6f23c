//! Snapshot storage for sitenav.
//!
//! The website collection is persisted as a single JSON document of the form
//! `{ "websites": [...], "categories": [] }`. Every mutation rewrites the
//! whole document; there is no append or partial-update mode.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`JsonFileStore`] -- the on-disk JSON file used by the server
//! - [`InMemoryRecordStore`] -- `RwLock`-guarded store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A save replaces the previous snapshot in full.
//! 2. A reader never observes a half-written file (write to temp, then rename).
//! 3. There is no locking across load/save pairs: concurrent writers race and
//!    the last save wins.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryRecordStore;
pub use traits::RecordStore;
