use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::record::Field;

/// Contents of worklog.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSection {
    /// Data file; relative paths resolve against the config file's directory
    #[serde(default = "default_file")]
    pub file: PathBuf,
    /// Persist after every add and completed edit, not only on quit
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for LogSection {
    fn default() -> Self {
        LogSection {
            file: default_file(),
            autosave: true,
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("log.csv")
}

fn default_true() -> bool {
    true
}

/// Initial ordering of the view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_order")]
    pub order: Field,
    #[serde(default = "default_true")]
    pub descending: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            order: default_order(),
            descending: true,
        }
    }
}

fn default_order() -> Field {
    Field::Date
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Resolved settings handed to the session and the UI at startup
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Data file to load from and persist to
    pub path: PathBuf,
    pub autosave: bool,
    pub view: ViewConfig,
    pub ui: UiConfig,
}

impl LogConfig {
    /// Defaults with the given data file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        LogConfig {
            path: path.into(),
            autosave: true,
            view: ViewConfig::default(),
            ui: UiConfig::default(),
        }
    }
}
