use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use sitenav_types::WebsiteSnapshot;

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// In-memory record store.
///
/// Intended for tests and embedding. Behaves like a [`JsonFileStore`] whose
/// file does not exist yet until the first save. Writes can be made to fail
/// with [`Self::set_fail_writes`] to exercise error paths.
///
/// [`JsonFileStore`]: crate::JsonFileStore
pub struct InMemoryRecordStore {
    snapshot: RwLock<Option<WebsiteSnapshot>>,
    fail_writes: AtomicBool,
}

impl InMemoryRecordStore {
    /// Create an empty store with no snapshot saved.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Create a store pre-seeded with `snapshot`.
    pub fn with_snapshot(snapshot: WebsiteSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves fail with `StoreError::Write`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of records in the stored snapshot (zero if none saved).
    pub fn len(&self) -> usize {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, WebsiteSnapshot::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> StoreResult<WebsiteSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| StoreError::Unavailable {
                path: PathBuf::from(self.location()),
                reason: "no snapshot saved".into(),
            })
    }

    fn save(&self, snapshot: &WebsiteSnapshot) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: PathBuf::from(self.location()),
                reason: "writes disabled".into(),
            });
        }
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}
