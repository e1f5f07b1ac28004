//! Error types for process discovery and control.

use thiserror::Error;

/// The OS process listing could not be obtained.
///
/// This is never "no editor found"; an empty listing is `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum ProcessQueryError {
    /// The listing command could not be started.
    #[error("failed to run process query `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The listing command ran but reported failure.
    #[error("process query `{command}` failed (exit code {exit_code:?}): {stderr}")]
    Failed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The listing command's output could not be understood.
    #[error("could not parse output of `{command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A signal or stop request could not be delivered.
///
/// A process that no longer exists is not an error; see
/// [`SignalDelivery::ProcessMissing`](crate::SignalDelivery::ProcessMissing).
#[derive(Debug, Error)]
pub enum ProcessControlError {
    #[error("refusing to signal invalid pid {0}")]
    InvalidPid(u32),

    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed for pid {pid} (exit code {exit_code:?}): {stderr}")]
    CommandFailed {
        pid: u32,
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Window focus or cooperative quit failed.
#[derive(Debug, Error)]
pub enum WindowControlError {
    #[error("window control is not supported on this platform")]
    Unsupported,

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed (exit code {exit_code:?}): {stderr}")]
    Failed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}
