use crate::cleaner::CacheCleaner;
use crate::error::LifecycleError;
use crate::lock::{is_lock_present, remove_lock_marker};
use editor_process_control::{ProcessDirectory, WindowControl};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether a launch may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    Allow,
    /// Do not launch. `message` is the text shown to the user.
    Skip { message: String },
}

impl AdmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether launching a project is safe.
///
/// A lock marker without a live process is treated as a crash: the cache is
/// cleared and the launch allowed. An editor that is still starting and has
/// not shown up in the process listing yet looks the same; that race is
/// accepted so a user is never locked out of a project.
pub struct AdmissionGuard {
    directory: Arc<dyn ProcessDirectory>,
    windows: Arc<dyn WindowControl>,
    cleaner: Arc<dyn CacheCleaner>,
}

impl AdmissionGuard {
    pub fn new(
        directory: Arc<dyn ProcessDirectory>,
        windows: Arc<dyn WindowControl>,
        cleaner: Arc<dyn CacheCleaner>,
    ) -> Self {
        Self {
            directory,
            windows,
            cleaner,
        }
    }

    pub async fn check(&self, project_path: &Path) -> Result<AdmissionDecision, LifecycleError> {
        if let Some(process) = self.directory.find_by_project_path(project_path).await? {
            if let Err(e) = self.windows.focus(process.pid).await {
                debug!(pid = process.pid, error = %e, "could not focus running editor");
            }
            info!(
                pid = process.pid,
                project = %project_path.display(),
                "editor already running, skipping launch"
            );
            return Ok(AdmissionDecision::Skip {
                message: format!(
                    "Editor already running for this project (pid {}), brought to front",
                    process.pid
                ),
            });
        }

        if !is_lock_present(project_path) {
            return Ok(AdmissionDecision::Allow);
        }

        warn!(
            project = %project_path.display(),
            "lock marker without a running editor, clearing crash leftovers"
        );
        self.cleaner.clean(project_path).await;
        if let Err(e) = remove_lock_marker(project_path).await {
            warn!(
                project = %project_path.display(),
                error = %e,
                "failed to remove lock marker"
            );
        }

        Ok(AdmissionDecision::Allow)
    }
}
