use crate::detect::detect;
use crate::error::{Result, StoreError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key/value pairs as enumerated by a store, in the store's own order.
pub type RawEntries = IndexMap<String, String>;

/// Which of the two web storage namespaces an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Local,
    Session,
}

impl StoreKind {
    pub fn all() -> [StoreKind; 2] {
        [StoreKind::Local, StoreKind::Session]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Local => "local",
            StoreKind::Session => "session",
        }
    }

    /// The name the browser exposes the store under.
    pub fn display_name(&self) -> &'static str {
        match self {
            StoreKind::Local => "localStorage",
            StoreKind::Session => "sessionStorage",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "localstorage" => Ok(StoreKind::Local),
            "session" | "sessionstorage" => Ok(StoreKind::Session),
            other => Err(StoreError::Api(format!("Unknown store kind: {}", other))),
        }
    }
}

/// Semantic type of a stored value, inferred by parsing it as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl TypeTag {
    pub fn all() -> [TypeTag; 6] {
        [
            TypeTag::String,
            TypeTag::Number,
            TypeTag::Boolean,
            TypeTag::Object,
            TypeTag::Array,
            TypeTag::Null,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Null => "null",
        }
    }

    /// Object and array values are edited as formatted JSON.
    pub fn is_structured(&self) -> bool {
        matches!(self, TypeTag::Object | TypeTag::Array)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        TypeTag::all()
            .into_iter()
            .find(|tag| tag.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| StoreError::Api(format!("Unknown type: {}", s)))
    }
}

/// One entry read from a store.
///
/// Items are values: filtering and editing produce new items or collections,
/// never modify an existing one. `size` always matches `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageItem {
    key: String,
    value: String,
    original_value: String,
    size: usize,
    #[serde(rename = "type")]
    type_tag: TypeTag,
}

impl StorageItem {
    /// Builds an item from the raw value as the store returned it.
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let type_tag = detect(&raw);
        Self {
            key: key.into(),
            size: raw.len(),
            value: raw.clone(),
            original_value: raw,
            type_tag,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    /// Byte length of `value` encoded as UTF-8.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }
}

/// Read-out of both stores at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    local: Vec<StorageItem>,
    session: Vec<StorageItem>,
}

impl Snapshot {
    pub fn new(local: Vec<StorageItem>, session: Vec<StorageItem>) -> Self {
        Self { local, session }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self, kind: StoreKind) -> &[StorageItem] {
        match kind {
            StoreKind::Local => &self.local,
            StoreKind::Session => &self.session,
        }
    }

    pub fn find(&self, kind: StoreKind, key: &str) -> Option<&StorageItem> {
        self.items(kind).iter().find(|item| item.key() == key)
    }

    pub fn total_size(&self, kind: StoreKind) -> usize {
        self.items(kind).iter().map(StorageItem::size).sum()
    }
}

/// Exported backup of a single store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub store_kind: StoreKind,
    pub timestamp: String,
    pub entries: RawEntries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counts_utf8_bytes() {
        let item = StorageItem::new("greeting", "héllo");
        assert_eq!(item.size(), 6);
        assert_eq!(item.value(), item.original_value());
    }

    #[test]
    fn store_kind_parses_browser_names() {
        assert_eq!("localStorage".parse::<StoreKind>().unwrap(), StoreKind::Local);
        assert_eq!("SESSION".parse::<StoreKind>().unwrap(), StoreKind::Session);
        assert!("cookies".parse::<StoreKind>().is_err());
    }

    #[test]
    fn type_tag_round_trips_through_name() {
        for tag in TypeTag::all() {
            assert_eq!(tag.as_str().parse::<TypeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn snapshot_totals_per_kind() {
        let snapshot = Snapshot::new(
            vec![StorageItem::new("a", "12"), StorageItem::new("b", "xyz")],
            vec![StorageItem::new("c", "1")],
        );
        assert_eq!(snapshot.total_size(StoreKind::Local), 5);
        assert_eq!(snapshot.total_size(StoreKind::Session), 1);
        assert!(snapshot.find(StoreKind::Session, "a").is_none());
        assert!(snapshot.find(StoreKind::Local, "b").is_some());
    }

    #[test]
    fn export_document_uses_camel_case_fields() {
        let mut entries = RawEntries::new();
        entries.insert("k".into(), "v".into());
        let doc = ExportDocument {
            store_kind: StoreKind::Session,
            timestamp: "2024-01-01T00:00:00.000Z".into(),
            entries,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["storeKind"], "session");
        assert_eq!(json["entries"]["k"], "v");
    }
}
