use super::DataStore;
use crate::error::{Result, StoreError};
use crate::model::{RawEntries, StoreKind};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// File-backed storage directory: `local.json` and `session.json`, each a
/// JSON object of string values.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn store_file(&self, kind: StoreKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.as_str()))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(StoreError::AccessDenied(format!(
                "storage directory {} does not exist",
                self.root.display()
            )));
        }
        Ok(())
    }

    fn save(&self, kind: StoreKind, entries: &RawEntries) -> Result<()> {
        let path = self.store_file(kind);
        let content = serde_json::to_string_pretty(entries).map_err(StoreError::Serialization)?;
        fs::write(&path, content).map_err(StoreError::Io)?;
        debug!("wrote {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    fn write_failure(key: &str, err: StoreError) -> StoreError {
        StoreError::WriteFailure {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

impl DataStore for FileStore {
    fn read(&self, kind: StoreKind) -> Result<RawEntries> {
        self.ensure_root()?;
        let path = self.store_file(kind);
        if !path.exists() {
            return Ok(RawEntries::new());
        }
        let content = fs::read_to_string(&path).map_err(StoreError::Io)?;
        if content.trim().is_empty() {
            return Ok(RawEntries::new());
        }
        let entries: RawEntries =
            serde_json::from_str(&content).map_err(StoreError::Serialization)?;
        debug!("read {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    fn write(&mut self, kind: StoreKind, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read(kind)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(kind, &entries)
            .map_err(|e| Self::write_failure(key, e))
    }

    fn remove(&mut self, kind: StoreKind, key: &str) -> Result<()> {
        let mut entries = self.read(kind)?;
        if entries.shift_remove(key).is_some() {
            self.save(kind, &entries)?;
        }
        Ok(())
    }

    fn clear(&mut self, kind: StoreKind) -> Result<()> {
        self.ensure_root()?;
        self.save(kind, &RawEntries::new())
    }
}
