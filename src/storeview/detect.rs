//! Value type detection.
//!
//! Every stored value is a string; its semantic type is whatever the string
//! parses to as a JSON document. Values that are not JSON are plain strings.
//!
//! Bare literals are always parsed in full, so a stored `42` is a number and
//! a stored `true` is a boolean, not a string.

use crate::model::TypeTag;
use serde::de::{Deserialize, IgnoredAny};

pub fn detect(raw: &str) -> TypeTag {
    json_kind(raw).unwrap_or(TypeTag::String)
}

/// Kind of the JSON document `raw` holds, or `None` if it is not exactly one
/// JSON document.
///
/// The document is scanned rather than built: nesting depth is unlimited and
/// numbers outside the `f64` range still count as numbers.
pub fn json_kind(raw: &str) -> Option<TypeTag> {
    let mut de = serde_json::Deserializer::from_str(raw);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(serde_stacker::Deserializer::new(&mut de)).ok()?;
    de.end().ok()?;

    let tag = match raw.trim_start().chars().next()? {
        '{' => TypeTag::Object,
        '[' => TypeTag::Array,
        '"' => TypeTag::String,
        't' | 'f' => TypeTag::Boolean,
        'n' => TypeTag::Null,
        _ => TypeTag::Number,
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_values() {
        assert_eq!(detect("[1,2,3]"), TypeTag::Array);
        assert_eq!(detect("[]"), TypeTag::Array);
        assert_eq!(detect(r#"{"x":1}"#), TypeTag::Object);
        assert_eq!(detect("{}"), TypeTag::Object);
        assert_eq!(detect("\n  [1]\n"), TypeTag::Array);
    }

    #[test]
    fn serialized_values_match_their_kind() {
        let cases = [
            (json!([1, "two"]), TypeTag::Array),
            (json!({"a": {"b": null}}), TypeTag::Object),
            (json!(null), TypeTag::Null),
            (json!(3.5), TypeTag::Number),
            (json!(false), TypeTag::Boolean),
        ];
        for (value, expected) in cases {
            assert_eq!(detect(&value.to_string()), expected, "{}", value);
        }
    }

    #[test]
    fn bare_literals_classify_by_json_kind() {
        assert_eq!(detect("42"), TypeTag::Number);
        assert_eq!(detect("-0.5e3"), TypeTag::Number);
        assert_eq!(detect("true"), TypeTag::Boolean);
        assert_eq!(detect("false"), TypeTag::Boolean);
        assert_eq!(detect("null"), TypeTag::Null);
        assert_eq!(detect(" 7 "), TypeTag::Number);
    }

    #[test]
    fn quoted_json_string_is_a_string() {
        assert_eq!(detect(r#""hello""#), TypeTag::String);
        assert_eq!(json_kind(r#""hello""#), Some(TypeTag::String));
    }

    #[test]
    fn non_json_is_a_string() {
        assert_eq!(detect("not json"), TypeTag::String);
        assert_eq!(detect(""), TypeTag::String);
        assert_eq!(detect("   "), TypeTag::String);
        assert_eq!(detect("{broken"), TypeTag::String);
        assert_eq!(detect("True"), TypeTag::String);
        assert_eq!(detect("012"), TypeTag::String);
        assert_eq!(detect("[1] [2]"), TypeTag::String);
        assert_eq!(detect("nul"), TypeTag::String);
        assert_eq!(json_kind("fals"), None);
    }

    #[test]
    fn deeply_nested_values_keep_their_kind() {
        let array = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(detect(&array), TypeTag::Array);

        let object = format!("{}1{}", r#"{"a":"#.repeat(300), "}".repeat(300));
        assert_eq!(detect(&object), TypeTag::Object);

        let unbalanced = format!("{}{}", "[".repeat(200), "]".repeat(199));
        assert_eq!(detect(&unbalanced), TypeTag::String);
    }

    #[test]
    fn numbers_beyond_f64_are_numbers() {
        assert_eq!(detect("1e400"), TypeTag::Number);
        assert_eq!(detect("-1e400"), TypeTag::Number);
        assert_eq!(detect("123456789012345678901234567890"), TypeTag::Number);
        assert_eq!(detect("[1e400]"), TypeTag::Array);
    }
}
