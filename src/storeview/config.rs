use crate::commands::filter::SearchField;
use crate::error::{Result, StoreError};
use crate::model::StoreKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PREVIEW_WIDTH: usize = 50;

/// Configuration for storeview, stored in `<storage dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreviewConfig {
    /// Store selected when no `--session` flag is given
    #[serde(default)]
    pub default_store: StoreKind,

    /// Characters of a value shown in list output before truncation
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,

    /// Field(s) searched when `--field` is omitted
    #[serde(default)]
    pub search_field: SearchField,

    /// Directory export files are written to (current directory if unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_preview_width() -> usize {
    DEFAULT_PREVIEW_WIDTH
}

impl Default for StoreviewConfig {
    fn default() -> Self {
        Self {
            default_store: StoreKind::default(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
            search_field: SearchField::default(),
            export_dir: None,
        }
    }
}

impl StoreviewConfig {
    pub const KEYS: [&'static str; 4] =
        ["default-store", "preview-width", "search-field", "export-dir"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StoreError::Io)?;
        let config: StoreviewConfig =
            serde_json::from_str(&content).map_err(StoreError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StoreError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StoreError::Serialization)?;
        fs::write(config_path, content).map_err(StoreError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-store" => Some(self.default_store.to_string()),
            "preview-width" => Some(self.preview_width.to_string()),
            "search-field" => Some(self.search_field.to_string()),
            "export-dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-store" => {
                self.default_store = value.parse().map_err(|e: StoreError| e.to_string())?;
            }
            "preview-width" => {
                let width: usize = value
                    .parse()
                    .map_err(|_| format!("preview-width must be a number, got {}", value))?;
                if width == 0 {
                    return Err("preview-width must be greater than zero".to_string());
                }
                self.preview_width = width;
            }
            "search-field" => {
                self.search_field = value.parse()?;
            }
            "export-dir" => {
                self.export_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}
