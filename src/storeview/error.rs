use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage not accessible: {0}")]
    AccessDenied(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Document has no entries object")]
    MissingEntries,

    #[error("Failed to write {key}: {reason}")]
    WriteFailure { key: String, reason: String },

    #[error("Invalid value: {0}")]
    ValidationFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
