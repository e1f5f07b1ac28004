//! # Observability
//!
//! Structured logging for the editor hub workspace.
//!
//! Binaries call [`init_with_config`] once at startup and every crate logs
//! through the standard `tracing` macros. Library crates never install a
//! subscriber themselves.
//!
//! Log lines are written as JSONL to a single append-only file
//! (`~/.ehub/logs/ehub.jsonl` unless overridden), so they can be inspected
//! with `tail -f ... | jq` while the terminal UI owns the screen.
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "ehub".into(),
//!         default_level: "debug".into(),
//!         ..Default::default()
//!     });
//!
//!     tracing::info!("ready");
//! }
//! ```

mod file_sink;
mod json_layer;

pub use json_layer::LogEntry;

use std::path::PathBuf;

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, included in every log line.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.ehub/logs/ehub.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr.
    ///
    /// Must stay off while a full-screen terminal UI is running.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize logging with custom configuration.
///
/// If the log file cannot be opened, logging falls back to stderr when
/// `also_stderr` is set and is otherwise disabled. A broken log directory
/// never prevents the tool from starting.
pub fn init_with_config(config: LogConfig) {
    if let Err(e) = try_init_with_config(&config) {
        if config.also_stderr {
            file_sink::init_stderr_only(&config);
            tracing::warn!(error = %e, "log file unavailable, logging to stderr only");
        }
    }
}

/// Initialize logging, reporting a failure to open the log file.
pub fn try_init_with_config(config: &LogConfig) -> std::io::Result<()> {
    file_sink::init_file_subscriber(config)
}

/// Default log file location.
pub fn default_log_path() -> Option<PathBuf> {
    file_sink::default_log_path()
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, instrument, trace, warn};

/// Re-export Level for advanced filtering.
pub use tracing::Level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "info");
        assert!(config.log_path.is_none());
        assert!(!config.also_stderr);
    }

    #[test]
    fn test_default_log_path_is_under_ehub() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".ehub/logs/ehub.jsonl"));
        }
    }
}
