//! Configuration file
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/aeroreg",
//!   "snapshot_file": "registry.snapshot.json",
//!   "genesis_height": 0,
//!   "log_level": "info",
//!   "log_json": false
//! }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::{is_known_level, LogConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Snapshot file name inside `data_dir`
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Ordering index before the first request ever served
    #[serde(default)]
    pub genesis_height: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

fn default_snapshot_file() -> String {
    "registry.snapshot.json".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.snapshot_file.is_empty()
            || self.snapshot_file == "."
            || self.snapshot_file == ".."
            || self.snapshot_file.contains('/')
            || self.snapshot_file.contains('\\')
        {
            return Err(CliError::config_error(format!(
                "Invalid snapshot_file: '{}'. Must be a plain file name.",
                self.snapshot_file
            )));
        }

        if !is_known_level(&self.log_level) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_path().join(&self.snapshot_file)
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::new(self.log_level.clone(), self.log_json)
    }
}
