use crate::commands::snapshot::snapshot;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::model::{ExportDocument, RawEntries, StorageItem, StoreKind};
use crate::store::DataStore;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub fn run<S: DataStore>(store: &S, kind: StoreKind, dir: &Path) -> Result<CmdResult> {
    let items = snapshot(&store.read(kind)?);
    let now = Utc::now();
    let doc = export_doc_at(&items, kind, now);

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(StoreError::Io)?;
    }
    let path = dir.join(backup_filename(kind, now.date_naive()));
    fs::write(&path, serialize(&doc)?).map_err(StoreError::Io)?;

    let mut result = CmdResult::default().with_export_path(path.clone());
    result.add_message(CmdMessage::success(format!(
        "Exported {} {} entries to {}",
        doc.entries.len(),
        kind.display_name(),
        path.display()
    )));
    Ok(result)
}

/// Builds the export document for one store, stamped with the current time.
pub fn export_doc(items: &[StorageItem], kind: StoreKind) -> ExportDocument {
    export_doc_at(items, kind, Utc::now())
}

/// Entries carry each item's current value; a repeated key keeps the last value.
pub fn export_doc_at(items: &[StorageItem], kind: StoreKind, at: DateTime<Utc>) -> ExportDocument {
    let mut entries = RawEntries::with_capacity(items.len());
    for item in items {
        entries.insert(item.key().to_string(), item.value().to_string());
    }
    ExportDocument {
        store_kind: kind,
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        entries,
    }
}

/// Pretty-printed JSON, two-space indented.
pub fn serialize(doc: &ExportDocument) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(StoreError::Serialization)
}

/// `localStorage_backup_2024-05-01.json`
pub fn backup_filename(kind: StoreKind, date: NaiveDate) -> String {
    format!("{}_backup_{}.json", kind.display_name(), date.format("%Y-%m-%d"))
}

pub fn default_export_dir(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
