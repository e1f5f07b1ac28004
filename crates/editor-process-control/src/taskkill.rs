use crate::command::{describe, run_captured};
use crate::control::{Liveness, ProcessControl, SignalDelivery};
use crate::error::ProcessControlError;
use async_trait::async_trait;
use tracing::debug;

/// `taskkill` reports a missing pid with this exit code.
const TASKKILL_NOT_FOUND_EXIT: i32 = 128;

/// Process control through `tasklist` and `taskkill` (Windows).
#[derive(Debug, Clone, Default)]
pub struct TaskkillProcessControl;

impl TaskkillProcessControl {
    pub fn new() -> Self {
        Self
    }

    async fn taskkill(&self, pid: u32, force: bool) -> Result<SignalDelivery, ProcessControlError> {
        if pid == 0 {
            return Err(ProcessControlError::InvalidPid(pid));
        }

        let pid_arg = pid.to_string();
        let mut args = Vec::with_capacity(3);
        if force {
            args.push("/F");
        }
        args.extend(["/PID", pid_arg.as_str()]);

        let command = describe("taskkill", &args);
        let output = run_captured("taskkill", &args)
            .await
            .map_err(|source| ProcessControlError::Signal { pid, source })?;

        if output.success {
            return Ok(SignalDelivery::Delivered);
        }
        if is_not_found(output.exit_code, &output.stderr) {
            return Ok(SignalDelivery::ProcessMissing);
        }
        Err(ProcessControlError::CommandFailed {
            pid,
            command,
            exit_code: output.exit_code,
            stderr: output.stderr,
        })
    }
}

fn is_not_found(exit_code: Option<i32>, stderr: &str) -> bool {
    exit_code == Some(TASKKILL_NOT_FOUND_EXIT) || stderr.to_ascii_lowercase().contains("not found")
}

/// Whether `tasklist /FO CSV /NH` output contains a row for `pid`.
pub(crate) fn tasklist_has_pid(stdout: &str, pid: u32) -> bool {
    let needle = format!("\"{}\"", pid);
    stdout.lines().any(|line| {
        // "Image Name","PID",...
        line.split(',').nth(1).map(str::trim) == Some(needle.as_str())
    })
}

#[async_trait]
impl ProcessControl for TaskkillProcessControl {
    async fn probe(&self, pid: u32) -> Liveness {
        let filter = format!("PID eq {}", pid);
        let args = ["/FI", filter.as_str(), "/NH", "/FO", "CSV"];
        match run_captured("tasklist", &args).await {
            Ok(output) if output.success => {
                if tasklist_has_pid(&output.stdout, pid) {
                    Liveness::Alive
                } else {
                    Liveness::Gone
                }
            }
            Ok(output) => {
                debug!(pid, exit_code = ?output.exit_code, "tasklist probe inconclusive");
                Liveness::Alive
            }
            Err(e) => {
                debug!(pid, error = %e, "tasklist probe inconclusive");
                Liveness::Alive
            }
        }
    }

    async fn terminate(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        self.taskkill(pid, false).await
    }

    async fn kill(&self, pid: u32) -> Result<SignalDelivery, ProcessControlError> {
        self.taskkill(pid, true).await
    }
}
