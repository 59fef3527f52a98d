use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::{ConfigFile, LogConfig};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "worklog.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file.
pub fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the settings for this run.
///
/// An explicit `config_path` must exist. Otherwise `worklog.toml` in `cwd` is
/// used when present, and defaults when not. `file_override` (from `--file`)
/// replaces the configured data file. Relative data paths resolve against
/// the directory holding the config file, or `cwd` without one.
pub fn resolve_config(
    cwd: &Path,
    config_path: Option<&Path>,
    file_override: Option<&Path>,
) -> Result<LogConfig, ConfigError> {
    let (file, base) = match config_path {
        Some(path) => {
            let path = cwd.join(path);
            let base = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (read_config_file(&path)?, base)
        }
        None => {
            let default_path = cwd.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                (read_config_file(&default_path)?, cwd.to_path_buf())
            } else {
                (ConfigFile::default(), cwd.to_path_buf())
            }
        }
    };

    let path = match file_override {
        Some(p) => cwd.join(p),
        None => base.join(&file.log.file),
    };

    Ok(LogConfig {
        path,
        autosave: file.log.autosave,
        view: file.view,
        ui: file.ui,
    })
}
