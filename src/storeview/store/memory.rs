use super::DataStore;
use crate::error::{Result, StoreError};
use crate::model::{RawEntries, StoreKind};
use std::collections::{HashMap, HashSet};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    stores: HashMap<StoreKind, RawEntries>,
    rejected_keys: HashSet<String>,
    inaccessible: bool,
    write_budget: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes to `key`, the way a full quota or a sealed page would.
    pub fn reject_writes_to(&mut self, key: impl Into<String>) {
        self.rejected_keys.insert(key.into());
    }

    /// Make every operation fail as if no page were reachable.
    pub fn set_inaccessible(&mut self, inaccessible: bool) {
        self.inaccessible = inaccessible;
    }

    /// Allow `writes` more writes, then deny access to writers only, like a
    /// page that navigates away mid-batch.
    pub fn deny_writes_after(&mut self, writes: usize) {
        self.write_budget = Some(writes);
    }

    fn check_access(&self) -> Result<()> {
        if self.inaccessible {
            return Err(StoreError::AccessDenied("no page attached".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn read(&self, kind: StoreKind) -> Result<RawEntries> {
        self.check_access()?;
        Ok(self.stores.get(&kind).cloned().unwrap_or_default())
    }

    fn write(&mut self, kind: StoreKind, key: &str, value: &str) -> Result<()> {
        self.check_access()?;
        if let Some(budget) = self.write_budget.as_mut() {
            if *budget == 0 {
                return Err(StoreError::AccessDenied("page went away".to_string()));
            }
            *budget -= 1;
        }
        if self.rejected_keys.contains(key) {
            return Err(StoreError::WriteFailure {
                key: key.to_string(),
                reason: "write rejected by store".to_string(),
            });
        }
        self.stores
            .entry(kind)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, kind: StoreKind, key: &str) -> Result<()> {
        self.check_access()?;
        if let Some(entries) = self.stores.get_mut(&kind) {
            entries.shift_remove(key);
        }
        Ok(())
    }

    fn clear(&mut self, kind: StoreKind) -> Result<()> {
        self.check_access()?;
        self.stores.remove(&kind);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entry(mut self, kind: StoreKind, key: &str, value: &str) -> Self {
            self.store.write(kind, key, value).unwrap();
            self
        }

        pub fn with_local(self, key: &str, value: &str) -> Self {
            self.with_entry(StoreKind::Local, key, value)
        }

        pub fn with_session(self, key: &str, value: &str) -> Self {
            self.with_entry(StoreKind::Session, key, value)
        }

        /// The mixed-type store used throughout the command tests.
        pub fn with_sample_local(self) -> Self {
            self.with_local("a", "1")
                .with_local("b", "[1,2]")
                .with_local("c", r#"{"x":1}"#)
                .with_local("d", "hello")
        }
    }
}
