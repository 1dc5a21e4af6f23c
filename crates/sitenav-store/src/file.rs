use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sitenav_types::WebsiteSnapshot;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// JSON-file-backed record store.
///
/// The snapshot lives in one pretty-printed JSON file. Saves go to a
/// temporary file in the same directory which is then renamed over the
/// target, so the file is always either the old or the new snapshot.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`, creating the parent directory if needed.
    ///
    /// The file itself is not created until the first save.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let dir = parent_dir(&path);
        fs::create_dir_all(&dir).map_err(|e| StoreError::Write {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn write_err(&self, e: impl ToString) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> StoreResult<WebsiteSnapshot> {
        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::Unavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let snapshot: WebsiteSnapshot =
            serde_json::from_str(&raw).map_err(|e| StoreError::Unavailable {
                path: self.path.clone(),
                reason: format!("invalid JSON: {e}"),
            })?;
        debug!(path = %self.path.display(), count = snapshot.len(), "snapshot loaded");
        Ok(snapshot)
    }

    fn save(&self, snapshot: &WebsiteSnapshot) -> StoreResult<()> {
        let dir = parent_dir(&self.path);
        let tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;

        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, snapshot)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush().map_err(|e| self.write_err(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        debug!(path = %self.path.display(), count = snapshot.len(), "snapshot saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
