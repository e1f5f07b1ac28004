//! Configuration for `ehub`.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default interval between status refreshes in the terminal UI.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 2_000;

/// Environment variable overriding `log_level`.
const LOG_LEVEL_ENV: &str = "EHUB_LOG_LEVEL";

/// Timeouts for staged editor termination, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminationSettings {
    pub graceful_timeout_ms: u64,
    pub forceful_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub kill_settle_ms: u64,
}

impl Default for TerminationSettings {
    fn default() -> Self {
        Self {
            graceful_timeout_ms: 3_000,
            forceful_timeout_ms: 5_000,
            poll_interval_ms: 200,
            kill_settle_ms: 200,
        }
    }
}

/// Main configuration, stored as JSON at `~/.ehub/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Override for the hub data directory holding `projects-v1.json`.
    #[serde(default)]
    pub hub_data_dir: Option<PathBuf>,
    /// Additional editor install roots probed after the platform defaults.
    #[serde(default)]
    pub extra_install_roots: Vec<PathBuf>,
    /// Staged termination timeouts.
    #[serde(default)]
    pub termination: TerminationSettings,
    /// Terminal UI status refresh interval.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            hub_data_dir: None,
            extra_install_roots: Vec::new(),
            termination: TerminationSettings::default(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration from `paths`, falling back to defaults when the
    /// file does not exist. Environment overrides are applied last.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var(LOG_LEVEL_ENV) {
            if !log_level.trim().is_empty() {
                self.log_level = log_level.trim().to_string();
            }
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.termination.poll_interval_ms == 0 {
            return Err(CoreError::Config(
                "termination.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.refresh_interval_ms == 0 {
            return Err(CoreError::Config(
                "refresh_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.hub_data_dir.is_none());
        assert!(config.extra_install_roots.is_empty());
        assert_eq!(config.termination.graceful_timeout_ms, 3_000);
        assert_eq!(config.termination.forceful_timeout_ms, 5_000);
        assert_eq!(config.termination.poll_interval_ms, 200);
        assert_eq!(config.termination.kill_settle_ms, 200);
    }

    #[test]
    fn test_config_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        std::fs::write(
            &config_path,
            r#"{
                "extra_install_roots": ["/opt/editors"],
                "termination": { "forceful_timeout_ms": 1000 }
            }"#,
        )
        .unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.extra_install_roots, vec![PathBuf::from("/opt/editors")]);
        assert_eq!(config.termination.forceful_timeout_ms, 1_000);
        assert_eq!(config.termination.graceful_timeout_ms, 3_000);
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn test_config_load_reads_config_file() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(
            paths.config_file(),
            r#"{ "hub_data_dir": "/data/hub", "termination": { "kill_settle_ms": 500 } }"#,
        )
        .unwrap();

        let loaded = Config::load(&paths).unwrap();
        assert_eq!(loaded.hub_data_dir, Some(PathBuf::from("/data/hub")));
        assert_eq!(loaded.termination.kill_settle_ms, 500);
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.termination, TerminationSettings::default());
    }

    #[test]
    fn test_config_rejects_zero_poll_interval() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(
            paths.config_file(),
            r#"{ "termination": { "poll_interval_ms": 0 } }"#,
        )
        .unwrap();

        let result = Config::load(&paths);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_config_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "{ not json").unwrap();

        assert!(matches!(Config::load(&paths), Err(CoreError::Json(_))));
    }
}
