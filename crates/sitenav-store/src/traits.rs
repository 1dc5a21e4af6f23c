use std::sync::Arc;

use sitenav_types::WebsiteSnapshot;

use crate::error::StoreResult;

/// Whole-snapshot storage for the website collection.
///
/// All implementations must satisfy these invariants:
/// - `save` replaces the previous snapshot entirely.
/// - `load` returns exactly what the last successful `save` wrote.
/// - No cross-call locking: a `load`/`save` pair is not atomic.
pub trait RecordStore: Send + Sync {
    /// Read the current snapshot.
    ///
    /// Returns `StoreError::Unavailable` if the backing data is missing or
    /// cannot be parsed.
    fn load(&self) -> StoreResult<WebsiteSnapshot>;

    /// Overwrite the stored snapshot.
    fn save(&self, snapshot: &WebsiteSnapshot) -> StoreResult<()>;

    /// Human-readable location of the data, for logs.
    fn location(&self) -> String;
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn load(&self) -> StoreResult<WebsiteSnapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &WebsiteSnapshot) -> StoreResult<()> {
        (**self).save(snapshot)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn load(&self) -> StoreResult<WebsiteSnapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &WebsiteSnapshot) -> StoreResult<()> {
        (**self).save(snapshot)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
