//! Paths, configuration and logging setup for the editor hub.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, TerminationSettings, DEFAULT_LOG_LEVEL, DEFAULT_REFRESH_INTERVAL_MS};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level, LogTarget};
pub use paths::Paths;
