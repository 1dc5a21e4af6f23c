use sitenav_store::RecordStore;
use sitenav_types::{WebsiteRecord, WebsiteSnapshot};
use tracing::{info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::reorder::reorder_records;
use crate::request::{NewWebsite, WebsiteUpdate};
use crate::validation::{ensure_unique_names, validate_name};

/// The website collection.
///
/// Every mutating call loads the full snapshot, changes it in memory, and
/// saves it back. Nothing is locked between the load and the save, so two
/// concurrent mutations race and the later save wins.
pub struct Catalog<S> {
    store: S,
}

impl<S: RecordStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current snapshot, or an empty one if the store cannot be read.
    pub fn snapshot(&self) -> WebsiteSnapshot {
        match self.store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(location = %self.store.location(), error = %e, "treating collection as empty");
                WebsiteSnapshot::default()
            }
        }
    }

    /// All records in display order.
    pub fn list(&self) -> Vec<WebsiteRecord> {
        self.snapshot().websites
    }

    /// The first record named `name`.
    pub fn get(&self, name: &str) -> CatalogResult<WebsiteRecord> {
        self.snapshot()
            .find(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Append a new record.
    pub fn create(&self, request: NewWebsite) -> CatalogResult<WebsiteRecord> {
        validate_name(&request.name)?;

        let mut snapshot = self.snapshot();
        if snapshot.find(&request.name).is_some() {
            return Err(CatalogError::Validation(format!(
                "a website named {} already exists",
                request.name
            )));
        }

        let record = request.into_record();
        snapshot.websites.push(record.clone());
        self.store.save(&snapshot)?;

        info!(name = %record.name, total = snapshot.len(), "website created");
        Ok(record)
    }

    /// Merge `update` into the first record named `name`.
    pub fn update(&self, name: &str, update: WebsiteUpdate) -> CatalogResult<WebsiteRecord> {
        let mut snapshot = self.snapshot();
        let index = snapshot
            .position(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        if let Some(new_name) = update.new_name() {
            let taken = snapshot
                .websites
                .iter()
                .enumerate()
                .any(|(i, w)| i != index && w.name == new_name);
            if taken {
                return Err(CatalogError::Validation(format!(
                    "a website named {new_name} already exists"
                )));
            }
        }

        let record = &mut snapshot.websites[index];
        update.apply_to(record);
        let updated = record.clone();
        self.store.save(&snapshot)?;

        info!(name, new_name = %updated.name, "website updated");
        Ok(updated)
    }

    /// Remove and return the first record named `name`.
    pub fn delete(&self, name: &str) -> CatalogResult<WebsiteRecord> {
        let mut snapshot = self.snapshot();
        let index = snapshot
            .position(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let removed = snapshot.websites.remove(index);
        self.store.save(&snapshot)?;

        info!(name, total = snapshot.len(), "website deleted");
        Ok(removed)
    }

    /// Move the named records to the front in the given order.
    ///
    /// Records not mentioned keep their relative order after them.
    pub fn reorder(&self, order: &[String]) -> CatalogResult<Vec<WebsiteRecord>> {
        let mut snapshot = self.snapshot();
        let websites = std::mem::take(&mut snapshot.websites);
        snapshot.websites = reorder_records(websites, order);
        self.store.save(&snapshot)?;

        info!(requested = order.len(), total = snapshot.len(), "websites reordered");
        Ok(snapshot.websites)
    }

    /// Replace the whole collection with `records`.
    ///
    /// Destructive: existing records are discarded, not merged. Returns the
    /// number of records written.
    pub fn import(&self, records: Vec<WebsiteRecord>) -> CatalogResult<usize> {
        for record in &records {
            validate_name(&record.name)?;
        }
        ensure_unique_names(&records)?;

        let snapshot = WebsiteSnapshot::new(records);
        self.store.save(&snapshot)?;

        info!(total = snapshot.len(), "websites imported");
        Ok(snapshot.len())
    }

    /// The stored snapshot, failing if the store cannot be read.
    ///
    /// Unlike [`Self::snapshot`] this never substitutes an empty collection,
    /// so a backup taken from an unreadable store is refused.
    pub fn export(&self) -> CatalogResult<WebsiteSnapshot> {
        Ok(self.store.load()?)
    }
}
