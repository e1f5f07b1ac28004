use crate::control::{Liveness, ProcessControl, SignalDelivery};
use crate::error::ProcessControlError;
use async_trait::async_trait;
use tracing::debug;

/// Signal delivery through `kill(2)`.
#[derive(Debug, Clone, Default)]
pub struct UnixProcessControl;

impl UnixProcessControl {
    pub fn new() -> Self {
        Self
    }
}

fn send_signal(pid: u32, signal: libc::c_int) -> Result<SignalDelivery, ProcessControlError> {
    // pid 0 and negative pids address process groups; never send those.
    let raw = libc::pid_t::try_from(pid).map_err(|_| ProcessControlError::InvalidPid(pid))?;
    if raw <= 0 {
        return Err(ProcessControlError::InvalidPid(pid));
    }

    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(raw, signal) };
    if rc == 0 {
        return Ok(SignalDelivery::Delivered);
    }

    let err = std::io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Ok(SignalDelivery::ProcessMissing),
        _ => Err(ProcessControlError::Signal { pid, source: err }),
    }
}

#[async_trait]
impl ProcessControl for UnixProcessControl {
    async fn probe(&self, pid: u32) -> Liveness {
        match send_signal(pid, 0) {
            Ok(SignalDelivery::Delivered) => Liveness::Alive,
            Ok(SignalDelivery::ProcessMissing) => Liveness::Gone,
            // EPERM: the pid exists but belongs to someone else.
            Err(e) => {
                debug!(pid, error = %e, "liveness probe inconclusive");
                Liveness::Alive
            }
        }
    }

    async fn terminate(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        send_signal(pid, libc::SIGTERM)
    }

    async fn kill(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        send_signal(pid, libc::SIGKILL)
    }
}
