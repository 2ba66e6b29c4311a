use crate::model::{StorageItem, TypeTag};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of an item a text query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    All,
    Key,
    Value,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::All => "all",
            SearchField::Key => "key",
            SearchField::Value => "value",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SearchField::All),
            "key" => Ok(SearchField::Key),
            "value" => Ok(SearchField::Value),
            other => Err(format!(
                "Unknown search field: {} (expected all, key or value)",
                other
            )),
        }
    }
}

/// Criteria for narrowing a list of items.
///
/// The default query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub query: String,
    pub type_tag: Option<TypeTag>,
    pub field: SearchField,
}

impl ItemQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_tag: Option<TypeTag>) -> Self {
        self.type_tag = type_tag;
        self
    }

    pub fn with_field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }
}

/// Returns the items matching `query`, in their original order.
///
/// The type constraint applies first; a non-empty text query then keeps
/// items whose selected field contains it, ignoring case.
pub fn filter(items: &[StorageItem], query: &ItemQuery) -> Vec<StorageItem> {
    let needle = query.query.to_lowercase();

    items
        .iter()
        .filter(|item| query.type_tag.map_or(true, |tag| item.type_tag() == tag))
        .filter(|item| needle.is_empty() || matches_text(item, &needle, query.field))
        .cloned()
        .collect()
}

fn matches_text(item: &StorageItem, needle: &str, field: SearchField) -> bool {
    let in_key = || item.key().to_lowercase().contains(needle);
    let in_value = || item.value().to_lowercase().contains(needle);
    match field {
        SearchField::Key => in_key(),
        SearchField::Value => in_value(),
        SearchField::All => in_key() || in_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::snapshot::snapshot;
    use crate::model::RawEntries;

    fn sample() -> Vec<StorageItem> {
        let mut entries = RawEntries::new();
        entries.insert("a".into(), "1".into());
        entries.insert("b".into(), "[1,2]".into());
        entries.insert("c".into(), r#"{"x":1}"#.into());
        entries.insert("d".into(), "hello".into());
        snapshot(&entries)
    }

    fn keys(items: &[StorageItem]) -> Vec<&str> {
        items.iter().map(StorageItem::key).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let items = sample();
        assert_eq!(filter(&items, &ItemQuery::default()), items);
    }

    #[test]
    fn text_query_matches_key_or_value() {
        let items = sample();
        assert_eq!(keys(&filter(&items, &ItemQuery::text("h"))), vec!["d"]);
    }

    #[test]
    fn type_constraint_alone() {
        let items = sample();
        let query = ItemQuery::default().with_type(Some(TypeTag::Array));
        assert_eq!(keys(&filter(&items, &query)), vec!["b"]);
    }

    #[test]
    fn type_filter_applies_before_text() {
        let items = sample();
        let query = ItemQuery::text("1").with_type(Some(TypeTag::Object));
        assert_eq!(keys(&filter(&items, &query)), vec!["c"]);
    }

    #[test]
    fn field_selector_limits_match() {
        let mut entries = RawEntries::new();
        entries.insert("userName".into(), "alice".into());
        entries.insert("theme".into(), "user-dark".into());
        let items = snapshot(&entries);

        let by_key = ItemQuery::text("USER").with_field(SearchField::Key);
        assert_eq!(keys(&filter(&items, &by_key)), vec!["userName"]);

        let by_value = ItemQuery::text("USER").with_field(SearchField::Value);
        assert_eq!(keys(&filter(&items, &by_value)), vec!["theme"]);

        let both = ItemQuery::text("user");
        assert_eq!(keys(&filter(&items, &both)), vec!["userName", "theme"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = sample();
        let query = ItemQuery::text("1").with_field(SearchField::Value);
        let once = filter(&items, &query);
        assert_eq!(filter(&once, &query), once);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter(&[], &ItemQuery::text("x")).is_empty());
    }

    #[test]
    fn parses_search_field() {
        assert_eq!("Key".parse::<SearchField>().unwrap(), SearchField::Key);
        assert!("title".parse::<SearchField>().is_err());
    }
}
