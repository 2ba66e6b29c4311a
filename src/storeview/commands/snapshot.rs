use crate::error::Result;
use crate::model::{RawEntries, Snapshot, StorageItem, StoreKind};
use crate::store::DataStore;

/// Turns a raw store dump into items, one per key, in dump order.
pub fn snapshot(entries: &RawEntries) -> Vec<StorageItem> {
    entries
        .iter()
        .map(|(key, value)| StorageItem::new(key.as_str(), value.as_str()))
        .collect()
}

/// Reads both stores and snapshots them.
pub fn run<S: DataStore>(store: &S) -> Result<Snapshot> {
    let local = snapshot(&store.read(StoreKind::Local)?);
    let session = snapshot(&store.read(StoreKind::Session)?);
    Ok(Snapshot::new(local, session))
}
