use crate::detect::json_kind;
use crate::error::StoreError;
use crate::model::TypeTag;
use std::fmt;

/// A rejected edit, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub reason: String,
}

impl Invalid {
    fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl From<Invalid> for StoreError {
    fn from(invalid: Invalid) -> Self {
        StoreError::ValidationFailure(invalid.reason)
    }
}

/// Checks that `candidate` can replace a value of the `declared` type.
///
/// Only arrays and objects are structurally checked; every other type
/// accepts any text verbatim.
pub fn validate(candidate: &str, declared: TypeTag) -> Result<(), Invalid> {
    match declared {
        TypeTag::String | TypeTag::Number | TypeTag::Boolean | TypeTag::Null => Ok(()),
        TypeTag::Array => match json_kind(candidate) {
            Some(TypeTag::Array) => Ok(()),
            _ => Err(Invalid::new("must be valid array")),
        },
        TypeTag::Object => match json_kind(candidate) {
            Some(TypeTag::Object) => Ok(()),
            _ => Err(Invalid::new("must be valid object")),
        },
    }
}
