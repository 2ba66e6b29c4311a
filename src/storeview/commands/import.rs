use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::model::StoreKind;
use crate::store::DataStore;
use indexmap::IndexMap;
use log::warn;
use serde_json::{Map, Value};

/// A parsed backup document.
///
/// Entry values are kept exactly as they appeared in the document; turning
/// them into store strings happens only when they are written back.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDocument {
    pub store_kind: Option<StoreKind>,
    pub timestamp: Option<String>,
    pub entries: IndexMap<String, Value>,
}

/// Parses a backup document. Only the entries object is required.
///
/// Older backups name their fields `type` and `data` instead of `storeKind`
/// and `entries`; both spellings are accepted. A leading byte order mark is
/// skipped.
pub fn parse_import(text: &str) -> Result<ImportDocument> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let parsed: Value =
        serde_json::from_str(text).map_err(|e| StoreError::MalformedDocument(e.to_string()))?;
    let mut object = match parsed {
        Value::Object(object) => object,
        _ => {
            return Err(StoreError::MalformedDocument(
                "expected a JSON object".to_string(),
            ))
        }
    };

    let entries = match take_field(&mut object, "entries", "data") {
        Some(Value::Object(entries)) => entries.into_iter().collect(),
        _ => return Err(StoreError::MissingEntries),
    };

    let store_kind = take_field(&mut object, "storeKind", "type")
        .and_then(|v| v.as_str().and_then(|s| s.parse().ok()));
    let timestamp = object
        .get("timestamp")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ImportDocument {
        store_kind,
        timestamp,
        entries,
    })
}

fn take_field(object: &mut Map<String, Value>, name: &str, legacy: &str) -> Option<Value> {
    object.remove(name).or_else(|| object.remove(legacy))
}

/// The string a store holds for an imported value: strings verbatim,
/// anything else as compact JSON text.
pub fn store_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Applies a backup document to `kind`, entry by entry.
///
/// A malformed document aborts before anything is written. Once writing
/// starts, a failed entry is reported and skipped.
pub fn run<S: DataStore>(store: &mut S, kind: StoreKind, text: &str) -> Result<CmdResult> {
    let doc = parse_import(text)?;
    let mut result = CmdResult::default();

    if let Some(doc_kind) = doc.store_kind {
        if doc_kind != kind {
            result.add_message(CmdMessage::warning(format!(
                "Backup was taken from {}, importing into {}",
                doc_kind.display_name(),
                kind.display_name()
            )));
        }
    }

    let total = doc.entries.len();
    let mut imported = 0;
    let mut written = Vec::with_capacity(total);
    for (key, value) in &doc.entries {
        match store.write(kind, key, &store_value(value)) {
            Ok(()) => {
                imported += 1;
                written.push(key.clone());
            }
            Err(err @ StoreError::AccessDenied(_)) => return Err(err),
            Err(err) => {
                warn!("import of {} failed: {}", key, err);
                result.add_message(CmdMessage::warning(format!(
                    "Failed to import {}: {}",
                    key, err
                )));
            }
        }
    }

    result.imported = Some(imported);
    result.affected_keys = written;
    result.add_message(CmdMessage::success(format!(
        "Imported {} of {} entries into {}",
        imported,
        total,
        kind.display_name()
    )));
    Ok(result)
}
