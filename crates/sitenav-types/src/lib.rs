//! Foundation types for sitenav.
//!
//! This crate provides the record and snapshot types shared by every other
//! sitenav crate.
//!
//! # Key Types
//!
//! - [`WebsiteRecord`] -- One dashboard entry: name, icon, and per-mode URLs
//! - [`WebsiteSnapshot`] -- The complete persisted collection, written wholesale
//! - [`AccessMode`] -- Which of a record's URLs a client navigates to

pub mod error;
pub mod mode;
pub mod record;

pub use error::TypeError;
pub use mode::AccessMode;
pub use record::{creation_id, WebsiteRecord, WebsiteSnapshot, UNSET_URL};
