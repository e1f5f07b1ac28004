//! Logging initialization for `ehub`.
//!
//! Thin wrapper over the observability crate. All output goes to the JSONL
//! log file; stderr is only added for non-interactive commands.

use crate::Paths;

/// Where the process is about to draw its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Full-screen terminal UI: never write logs to stderr.
    Tui,
    /// One-shot CLI command: warnings and errors are mirrored to stderr.
    Cli,
}

/// Initialize the logging system.
///
/// * `level` - Default log level (trace, debug, info, warn, error); `RUST_LOG`
///   takes precedence when set.
pub fn init_logging(paths: &Paths, level: &str, target: LogTarget) {
    observability::init_with_config(observability::LogConfig {
        service_name: "ehub".into(),
        default_level: normalize_level(level).into(),
        log_path: Some(paths.log_file()),
        also_stderr: target == LogTarget::Cli,
    });
}

fn normalize_level(level: &str) -> &'static str {
    match parse_level(level) {
        tracing::Level::TRACE => "trace",
        tracing::Level::DEBUG => "debug",
        tracing::Level::INFO => "info",
        tracing::Level::WARN => "warn",
        tracing::Level::ERROR => "error",
    }
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
