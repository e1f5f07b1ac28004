use crate::error::LifecycleError;
use editor_process_control::{
    Liveness, ProcessControl, ProcessDirectory, SignalDelivery, WindowControl,
};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Escalation step that ended an editor process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminationStage {
    /// The editor quit on request, as if the user had quit it.
    Graceful,
    /// It exited after a terminate signal.
    Forceful,
    /// It was killed.
    Kill,
}

impl fmt::Display for TerminationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Graceful => "graceful",
            Self::Forceful => "forceful",
            Self::Kill => "kill",
        })
    }
}

/// Result of one termination attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerminationOutcome {
    pub terminated: bool,
    /// The stage that ended the process. `None` when nothing was stopped.
    pub stage: Option<TerminationStage>,
    /// `false` when no editor had the project open.
    pub process_found: bool,
}

impl TerminationOutcome {
    pub fn nothing_to_stop() -> Self {
        Self {
            terminated: false,
            stage: None,
            process_found: false,
        }
    }

    pub fn terminated_at(stage: TerminationStage) -> Self {
        Self {
            terminated: true,
            stage: Some(stage),
            process_found: true,
        }
    }

    pub fn survived() -> Self {
        Self {
            terminated: false,
            stage: None,
            process_found: true,
        }
    }

    /// The editor did not get to clean up after itself.
    pub fn requires_cache_cleanup(&self) -> bool {
        matches!(
            self.stage,
            Some(TerminationStage::Forceful | TerminationStage::Kill)
        )
    }
}

/// Stage timeouts and poll cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationTimings {
    pub graceful_timeout: Duration,
    pub forceful_timeout: Duration,
    pub poll_interval: Duration,
    pub kill_settle: Duration,
}

impl Default for TerminationTimings {
    fn default() -> Self {
        Self {
            graceful_timeout: Duration::from_secs(3),
            forceful_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(200),
            kill_settle: Duration::from_millis(200),
        }
    }
}

/// Stops the editor that has a project open, escalating from a cooperative
/// quit to a terminate signal to a kill.
pub struct TerminationCoordinator {
    directory: Arc<dyn ProcessDirectory>,
    control: Arc<dyn ProcessControl>,
    windows: Arc<dyn WindowControl>,
    timings: TerminationTimings,
}

impl TerminationCoordinator {
    pub fn new(
        directory: Arc<dyn ProcessDirectory>,
        control: Arc<dyn ProcessControl>,
        windows: Arc<dyn WindowControl>,
        timings: TerminationTimings,
    ) -> Self {
        Self {
            directory,
            control,
            windows,
            timings,
        }
    }

    pub async fn terminate(&self, project_path: &Path) -> Result<TerminationOutcome, LifecycleError> {
        let Some(process) = self.directory.find_by_project_path(project_path).await? else {
            debug!(project = %project_path.display(), "no editor running, nothing to stop");
            return Ok(TerminationOutcome::nothing_to_stop());
        };

        let outcome = self.terminate_pid(process.pid).await;
        match outcome.stage {
            Some(stage) => info!(
                pid = process.pid,
                project = %project_path.display(),
                %stage,
                "editor stopped"
            ),
            None => warn!(
                pid = process.pid,
                project = %project_path.display(),
                "editor survived every termination stage"
            ),
        }
        Ok(outcome)
    }

    /// Run the stages against `pid`. Never fails; a process that outlives
    /// the kill stage is reported as not terminated.
    pub async fn terminate_pid(&self, pid: u32) -> TerminationOutcome {
        if self.windows.supports_cooperative_quit() {
            match self.windows.request_quit(pid).await {
                Ok(()) => {
                    if self.wait_for_exit(pid, self.timings.graceful_timeout).await {
                        return TerminationOutcome::terminated_at(TerminationStage::Graceful);
                    }
                }
                // Nothing was asked to quit, so there is nothing to wait for.
                Err(e) => warn!(pid, error = %e, "cooperative quit failed, escalating"),
            }
        }

        match self.control.terminate(pid).await {
            Ok(SignalDelivery::ProcessMissing) => {
                return TerminationOutcome::terminated_at(TerminationStage::Forceful);
            }
            Ok(SignalDelivery::Delivered) => {
                if self.wait_for_exit(pid, self.timings.forceful_timeout).await {
                    return TerminationOutcome::terminated_at(TerminationStage::Forceful);
                }
            }
            Err(e) => warn!(pid, error = %e, "terminate signal failed, escalating to kill"),
        }

        match self.control.kill(pid).await {
            Ok(SignalDelivery::ProcessMissing) => {
                return TerminationOutcome::terminated_at(TerminationStage::Kill);
            }
            Ok(SignalDelivery::Delivered) => {}
            Err(e) => warn!(pid, error = %e, "kill signal failed"),
        }

        tokio::time::sleep(self.timings.kill_settle).await;
        match self.control.probe(pid).await {
            Liveness::Gone => TerminationOutcome::terminated_at(TerminationStage::Kill),
            Liveness::Alive => TerminationOutcome::survived(),
        }
    }

    /// Poll until `pid` is gone or `timeout` elapses.
    async fn wait_for_exit(&self, pid: u32, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.control.probe(pid).await == Liveness::Gone {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            tokio::time::sleep(self.timings.poll_interval.min(deadline - now)).await;
        }
    }
}
