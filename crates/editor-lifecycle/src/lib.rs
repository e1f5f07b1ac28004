//! Lifecycle coordination for editor processes.
//!
//! - [`AdmissionGuard`] decides whether a launch is safe and clears crash
//!   leftovers when a lock marker has no running editor behind it.
//! - [`LaunchCoordinator`] resolves the editor binary and spawns it detached.
//! - [`TerminationCoordinator`] stops an editor in stages.
//! - [`TempCleaner`] removes the project's transient cache.
//!
//! [`EditorLifecycle`] wires these together over one [`Platform`]. None of
//! them serialize work per project; callers must not run two operations on
//! the same project at once.

mod admission;
mod args;
mod cleaner;
mod error;
mod install;
mod launch;
pub mod lock;
mod status;
mod termination;

pub use admission::{AdmissionDecision, AdmissionGuard};
pub use args::tokenize_args;
pub use cleaner::{CacheCleaner, TempCleaner, CACHE_DIR_NAME};
pub use error::{LaunchError, LifecycleError};
pub use install::{default_install_roots, EditorInstallations, EDITOR_BINARY_RELATIVE};
pub use launch::{
    BoxError, ExtraArgsSource, LaunchCoordinator, LaunchRecorder, LaunchRequest, LaunchedEditor,
    NoExtraArgs, NoopRecorder,
};
pub use status::{derive_status, ProjectStatus};
pub use termination::{
    TerminationCoordinator, TerminationOutcome, TerminationStage, TerminationTimings,
};

use editor_process_control::{Platform, ProcessDirectory};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Admission, launch, termination and status for editor processes.
pub struct EditorLifecycle {
    directory: Arc<dyn ProcessDirectory>,
    cleaner: Arc<dyn CacheCleaner>,
    admission: AdmissionGuard,
    launcher: LaunchCoordinator,
    termination: TerminationCoordinator,
}

impl EditorLifecycle {
    pub fn new(
        platform: &Platform,
        cleaner: Arc<dyn CacheCleaner>,
        launcher: LaunchCoordinator,
        timings: TerminationTimings,
    ) -> Self {
        Self {
            directory: platform.directory.clone(),
            cleaner: cleaner.clone(),
            admission: AdmissionGuard::new(
                platform.directory.clone(),
                platform.windows.clone(),
                cleaner,
            ),
            launcher,
            termination: TerminationCoordinator::new(
                platform.directory.clone(),
                platform.control.clone(),
                platform.windows.clone(),
                timings,
            ),
        }
    }

    pub async fn admit(&self, project_path: &Path) -> Result<AdmissionDecision, LifecycleError> {
        self.admission.check(project_path).await
    }

    /// Spawn the editor. Call [`admit`](Self::admit) first.
    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchedEditor, LaunchError> {
        self.launcher.launch(request).await
    }

    /// Stop the project's editor, then clear its cache if it was stopped by
    /// force.
    pub async fn stop(&self, project_path: &Path) -> Result<TerminationOutcome, LifecycleError> {
        let outcome = self.termination.terminate(project_path).await?;
        if outcome.requires_cache_cleanup() {
            debug!(project = %project_path.display(), "clearing cache after forced stop");
            self.cleaner.clean(project_path).await;
        }
        Ok(outcome)
    }

    pub async fn status(&self, project_path: &Path) -> Result<ProjectStatus, LifecycleError> {
        let process = self.directory.find_by_project_path(project_path).await?;
        Ok(derive_status(
            process.is_some(),
            lock::is_lock_present(project_path),
        ))
    }

    /// Status of many projects from a single process listing.
    pub async fn statuses(
        &self,
        project_paths: &[PathBuf],
    ) -> Result<Vec<(PathBuf, ProjectStatus)>, LifecycleError> {
        let processes = self.directory.list_managed_processes().await?;
        Ok(project_paths
            .iter()
            .map(|path| {
                let running = processes.iter().any(|p| p.matches_project(path));
                let status = derive_status(running, lock::is_lock_present(path));
                (path.clone(), status)
            })
            .collect())
    }
}
