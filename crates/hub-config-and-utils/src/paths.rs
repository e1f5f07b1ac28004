//! File system paths owned by the editor hub itself.
//!
//! The hub's own data (projects registry, settings) lives elsewhere and is
//! resolved by `hub-projects`; these paths only cover `ehub`'s config and logs.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Name of the per-user state directory under the home directory.
const BASE_DIR_NAME: &str = ".ehub";
/// Log file name inside the logs directory.
const LOG_FILE_NAME: &str = "ehub.jsonl";

/// Manages file system paths for `ehub`.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for config and logs (~/.ehub)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.ehub`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the config file path (~/.ehub/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the logs directory (~/.ehub/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the log file path (~/.ehub/logs/ehub.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }
}
