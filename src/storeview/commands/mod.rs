use crate::config::StoreviewConfig;
use crate::model::StorageItem;
use std::path::PathBuf;

pub mod confirm;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod filter;
pub mod import;
pub mod list;
pub mod snapshot;
pub mod stats;
pub mod validate;

pub use confirm::{ConfirmRequest, PendingAction};
pub use stats::StoreStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_items: Vec<StorageItem>,
    pub affected_keys: Vec<String>,
    pub export_path: Option<PathBuf>,
    pub imported: Option<usize>,
    pub stats: Vec<StoreStats>,
    pub config: Option<StoreviewConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_items(mut self, items: Vec<StorageItem>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_affected_keys(mut self, keys: Vec<String>) -> Self {
        self.affected_keys = keys;
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    pub fn with_stats(mut self, stats: Vec<StoreStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_config(mut self, config: StoreviewConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
