use crate::error::ProcessControlError;
use async_trait::async_trait;

/// Result of a zero-effect liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Gone,
}

/// Outcome of delivering a stop signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDelivery {
    /// The OS accepted the signal.
    Delivered,
    /// The pid no longer exists. Callers treat this as confirmed exit.
    ProcessMissing,
}

/// Signals a process by pid.
#[async_trait]
pub trait ProcessControl: Send + Sync {
    /// Check whether `pid` still exists.
    ///
    /// A probe that cannot decide reports `Alive`, so termination keeps
    /// escalating rather than declaring success early.
    async fn probe(&self, pid: u32) -> Liveness;

    /// Ask the process to stop (SIGTERM or the platform equivalent).
    async fn terminate(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError>;

    /// Stop the process immediately (SIGKILL or the platform equivalent).
    async fn kill(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError>;
}
