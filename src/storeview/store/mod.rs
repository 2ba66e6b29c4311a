//! # Storage Layer
//!
//! The [`DataStore`] trait is the boundary to the live key-value stores being
//! inspected. Everything above it (commands, API) is pure logic over what the
//! store returns; nothing above it knows where the data physically lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a storage directory holding one JSON object per store
//!   kind:
//!   ```text
//!   <dir>/
//!   ├── local.json      # localStorage entries, in insertion order
//!   ├── session.json    # sessionStorage entries
//!   └── config.json     # storeview configuration
//!   ```
//!   A missing directory means there is no page to inspect and is reported
//!   as [`StoreError::AccessDenied`](crate::error::StoreError::AccessDenied).
//!
//! - [`memory::InMemoryStore`]: non-persistent store for tests.
//!
//! Local and session stores are separate namespaces: the same key may exist
//! in both with unrelated values.

use crate::error::Result;
use crate::model::{RawEntries, StoreKind};

pub mod fs;
pub mod memory;

/// Reader and writer for the two web storage namespaces.
pub trait DataStore {
    /// Read every entry of a store, in the store's enumeration order.
    fn read(&self, kind: StoreKind) -> Result<RawEntries>;

    /// Create or overwrite a single entry.
    fn write(&mut self, kind: StoreKind, key: &str, value: &str) -> Result<()>;

    /// Remove a single entry. Removing a missing key is not an error.
    fn remove(&mut self, kind: StoreKind, key: &str) -> Result<()>;

    /// Remove every entry of a store.
    fn clear(&mut self, kind: StoreKind) -> Result<()>;
}
