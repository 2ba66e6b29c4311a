use crate::commands::validate::validate;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{StorageItem, StoreKind, TypeTag};
use crate::store::DataStore;
use log::debug;
use serde_json::Value;

/// Text presented to the user when editing one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub key: String,
    pub type_tag: TypeTag,
    pub text: String,
}

impl EditSession {
    /// Objects and arrays are laid out as indented JSON; everything else is
    /// edited as the raw stored text.
    pub fn prepare(item: &StorageItem) -> Self {
        let raw = item.original_value();
        let text = if item.type_tag().is_structured() {
            pretty_json(raw).unwrap_or_else(|| raw.to_string())
        } else {
            raw.to_string()
        };
        Self {
            key: item.key().to_string(),
            type_tag: item.type_tag(),
            text,
        }
    }

    /// Number of characters (not bytes) in the edit buffer.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// File extension for the temporary editor buffer.
    pub fn file_ext(&self) -> &'static str {
        if self.type_tag.is_structured() {
            ".json"
        } else {
            ".txt"
        }
    }
}

fn pretty_json(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

/// Replaces the value of an existing item after checking it against the
/// item's detected type. Nothing is written when validation fails.
pub fn run<S: DataStore>(
    store: &mut S,
    kind: StoreKind,
    key: &str,
    declared: TypeTag,
    text: &str,
) -> Result<CmdResult> {
    validate(text, declared)?;
    store.write(kind, key, text)?;
    debug!("updated {} in {}", key, kind.display_name());

    let mut result = CmdResult::default().with_affected_keys(vec![key.to_string()]);
    result.add_message(CmdMessage::success(format!("Saved {}", key)));
    Ok(result)
}

/// Writes a value by key. A new key takes any text; overwriting a key that
/// already holds `existing` goes through the same check as [`run`].
pub fn set<S: DataStore>(
    store: &mut S,
    kind: StoreKind,
    key: &str,
    existing: Option<TypeTag>,
    value: &str,
) -> Result<CmdResult> {
    if let Some(declared) = existing {
        validate(value, declared)?;
    }
    store.write(kind, key, value)?;
    let mut result = CmdResult::default().with_affected_keys(vec![key.to_string()]);
    result.add_message(CmdMessage::success(format!(
        "Set {} in {}",
        key,
        kind.display_name()
    )));
    Ok(result)
}
