//! Wiring shared by the one-shot commands and the terminal UI.

use anyhow::{anyhow, Context as _, Result};
use editor_lifecycle::{
    default_install_roots, AdmissionDecision, EditorInstallations, EditorLifecycle,
    LaunchCoordinator, LaunchRequest, LaunchedEditor, TempCleaner, TerminationTimings,
};
use editor_process_control::{normalize_project_path, Platform};
use hub_config_and_utils::{Config, TerminationSettings};
use hub_projects::{
    read_project_version, secondary_install_path, sort_projects, HubPaths, HubProject,
    HubProjectRegistry, HubProjectSettings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Everything needed to list, launch and stop projects.
pub struct HubContext {
    pub config: Config,
    pub registry: HubProjectRegistry,
    pub lifecycle: Arc<EditorLifecycle>,
}

impl HubContext {
    pub fn new(config: Config) -> Result<Self> {
        let hub_paths = HubPaths::resolve(config.hub_data_dir.as_deref())?;
        Self::with_platform(config, hub_paths, &Platform::for_current_platform())
    }

    pub fn with_platform(config: Config, hub_paths: HubPaths, platform: &Platform) -> Result<Self> {
        let registry = HubProjectRegistry::new(&hub_paths);
        let settings = HubProjectSettings::new(&hub_paths);
        let installations = install_roots(&config, &hub_paths);
        debug!(roots = ?installations.roots(), "editor install roots");

        let launcher = LaunchCoordinator::new(
            installations,
            Arc::new(settings),
            Arc::new(registry.clone()),
        );
        let lifecycle = EditorLifecycle::new(
            platform,
            Arc::new(TempCleaner::new()),
            launcher,
            termination_timings(&config.termination),
        );

        Ok(Self {
            config,
            registry,
            lifecycle: Arc::new(lifecycle),
        })
    }

    /// Registered projects, favorites first then most recently used.
    pub fn projects(&self) -> Result<Vec<HubProject>> {
        let mut projects = self.registry.load().with_context(|| {
            format!(
                "failed to read hub registry {}",
                self.registry.file().display()
            )
        })?;
        sort_projects(&mut projects);
        Ok(projects)
    }

    /// Find a project by path or title. A directory that is not in the
    /// registry is accepted as long as it names its editor version.
    pub fn find_project(&self, query: &str) -> Result<HubProject> {
        let projects = self.projects()?;
        let as_path = normalize_project_path(Path::new(query));

        if let Some(project) = projects
            .iter()
            .find(|p| normalize_project_path(&p.path) == as_path)
            .or_else(|| projects.iter().find(|p| p.title.eq_ignore_ascii_case(query)))
        {
            return Ok(project.clone());
        }

        let path = PathBuf::from(query);
        if path.is_dir() {
            let path = path.canonicalize().unwrap_or(path);
            let title = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| query.to_string());
            return Ok(HubProject {
                title,
                version: read_project_version(&path),
                path,
                last_modified: None,
                favorite: false,
            });
        }

        Err(anyhow!("no project matches '{}'", query))
    }
}

fn install_roots(config: &Config, hub_paths: &HubPaths) -> EditorInstallations {
    let mut installations = EditorInstallations::new(default_install_roots());
    match secondary_install_path(hub_paths) {
        Ok(Some(root)) => installations.add_root(root),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "ignoring unreadable secondary install path"),
    }
    for root in &config.extra_install_roots {
        installations.add_root(root.clone());
    }
    installations
}

pub fn termination_timings(settings: &TerminationSettings) -> TerminationTimings {
    TerminationTimings {
        graceful_timeout: Duration::from_millis(settings.graceful_timeout_ms),
        forceful_timeout: Duration::from_millis(settings.forceful_timeout_ms),
        poll_interval: Duration::from_millis(settings.poll_interval_ms),
        kill_settle: Duration::from_millis(settings.kill_settle_ms),
    }
}

/// What happened when a project was opened.
#[derive(Debug)]
pub enum OpenOutcome {
    Launched(LaunchedEditor),
    Skipped(String),
}

/// Check admission, then launch if allowed.
pub async fn open_project(lifecycle: &EditorLifecycle, project: &HubProject) -> Result<OpenOutcome> {
    let version = project
        .version
        .clone()
        .ok_or_else(|| anyhow!("no editor version recorded for {}", project.title))?;

    match lifecycle.admit(&project.path).await? {
        AdmissionDecision::Skip { message } => Ok(OpenOutcome::Skipped(message)),
        AdmissionDecision::Allow => {
            let launched = lifecycle
                .launch(&LaunchRequest::new(&project.path, version))
                .await?;
            Ok(OpenOutcome::Launched(launched))
        }
    }
}
