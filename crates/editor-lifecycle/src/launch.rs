use crate::args::tokenize_args;
use crate::error::LaunchError;
use crate::install::EditorInstallations;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use editor_process_control::command_line::PROJECT_PATH_FLAG;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{info, warn};

/// Error type for collaborator traits implemented outside this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Receives "project launched now" write-backs.
#[async_trait]
pub trait LaunchRecorder: Send + Sync {
    async fn mark_launched(&self, project_path: &Path, at: DateTime<Utc>) -> Result<(), BoxError>;
}

/// Supplies the raw per-project extra argument string, if any.
#[async_trait]
pub trait ExtraArgsSource: Send + Sync {
    async fn extra_args(&self, project_path: &Path) -> Result<Option<String>, BoxError>;
}

/// Recorder that records nothing.
#[derive(Debug, Clone, Default)]
pub struct NoopRecorder;

#[async_trait]
impl LaunchRecorder for NoopRecorder {
    async fn mark_launched(&self, _project_path: &Path, _at: DateTime<Utc>) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Source without any extra arguments.
#[derive(Debug, Clone, Default)]
pub struct NoExtraArgs;

#[async_trait]
impl ExtraArgsSource for NoExtraArgs {
    async fn extra_args(&self, _project_path: &Path) -> Result<Option<String>, BoxError> {
        Ok(None)
    }
}

/// What to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub project_path: PathBuf,
    /// Editor version the project requires, e.g. `2022.3.1f1`.
    pub version: String,
}

impl LaunchRequest {
    pub fn new(project_path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            version: version.into(),
        }
    }
}

/// A spawn the OS accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedEditor {
    pub binary: PathBuf,
    pub args: Vec<String>,
    /// Absent if the child was reaped before its id could be read.
    pub pid: Option<u32>,
}

/// Resolves, spawns and records editor launches.
///
/// Admission is the caller's job; nothing here looks at locks or running
/// processes.
pub struct LaunchCoordinator {
    installations: EditorInstallations,
    extra_args: Arc<dyn ExtraArgsSource>,
    recorder: Arc<dyn LaunchRecorder>,
}

impl LaunchCoordinator {
    pub fn new(
        installations: EditorInstallations,
        extra_args: Arc<dyn ExtraArgsSource>,
        recorder: Arc<dyn LaunchRecorder>,
    ) -> Self {
        Self {
            installations,
            extra_args,
            recorder,
        }
    }

    pub fn resolve_editor_path(&self, version: &str) -> Result<PathBuf, LaunchError> {
        self.installations.resolve_editor_path(version)
    }

    /// Tokenized extra arguments for the project. Read failures yield none.
    pub async fn read_extra_args(&self, project_path: &Path) -> Vec<String> {
        match self.extra_args.extra_args(project_path).await {
            Ok(Some(raw)) => tokenize_args(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    project = %project_path.display(),
                    error = %e,
                    "failed to read extra editor arguments, launching without them"
                );
                Vec::new()
            }
        }
    }

    /// `-projectPath <path>` followed by the extra arguments.
    pub fn build_args(project_path: &Path, extra: Vec<String>) -> Vec<String> {
        let mut args = Vec::with_capacity(2 + extra.len());
        args.push(PROJECT_PATH_FLAG.to_string());
        args.push(project_path.to_string_lossy().into_owned());
        args.extend(extra);
        args
    }

    pub async fn launch(&self, request: &LaunchRequest) -> Result<LaunchedEditor, LaunchError> {
        let binary = self.resolve_editor_path(&request.version)?;
        let extra = self.read_extra_args(&request.project_path).await;
        let args = Self::build_args(&request.project_path, extra);

        let pid = spawn_detached(&binary, &args).map_err(|source| LaunchError::SpawnFailed {
            binary: binary.clone(),
            source,
        })?;

        info!(
            pid = ?pid,
            version = %request.version,
            project = %request.project_path.display(),
            "launched editor"
        );

        if let Err(e) = self
            .recorder
            .mark_launched(&request.project_path, Utc::now())
            .await
        {
            warn!(
                project = %request.project_path.display(),
                error = %e,
                "failed to record launch time"
            );
        }

        Ok(LaunchedEditor { binary, args, pid })
    }
}

/// Start `binary` with no stdio, in its own process group, without tying its
/// lifetime to ours.
fn spawn_detached(binary: &Path, args: &[String]) -> std::io::Result<Option<u32>> {
    let mut cmd = Command::new(binary);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false);

    #[cfg(unix)]
    cmd.process_group(0);

    #[cfg(windows)]
    {
        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    // Dropping the handle leaves the child running; the runtime reaps it.
    let child = cmd.spawn()?;
    Ok(child.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_path_comes_first() {
        let args = LaunchCoordinator::build_args(
            Path::new("/work/My Game"),
            vec!["-force-vulkan".to_string(), "-logFile".to_string()],
        );
        assert_eq!(
            args,
            vec!["-projectPath", "/work/My Game", "-force-vulkan", "-logFile"]
        );
    }

    struct FailingArgs;

    #[async_trait]
    impl ExtraArgsSource for FailingArgs {
        async fn extra_args(&self, _project_path: &Path) -> Result<Option<String>, BoxError> {
            Err("settings unreadable".into())
        }
    }

    struct FixedArgs(&'static str);

    #[async_trait]
    impl ExtraArgsSource for FixedArgs {
        async fn extra_args(&self, _project_path: &Path) -> Result<Option<String>, BoxError> {
            Ok(Some(self.0.to_string()))
        }
    }

    fn coordinator(source: Arc<dyn ExtraArgsSource>) -> LaunchCoordinator {
        LaunchCoordinator::new(
            EditorInstallations::default(),
            source,
            Arc::new(NoopRecorder),
        )
    }

    #[tokio::test]
    async fn extra_args_are_tokenized() {
        let launcher = coordinator(Arc::new(FixedArgs(r#"-foo "bar baz" 'qux'"#)));
        assert_eq!(
            launcher.read_extra_args(Path::new("/p")).await,
            vec!["-foo", "bar baz", "qux"]
        );
    }

    #[tokio::test]
    async fn extra_args_read_failure_is_empty() {
        let launcher = coordinator(Arc::new(FailingArgs));
        assert!(launcher.read_extra_args(Path::new("/p")).await.is_empty());
    }

    #[tokio::test]
    async fn missing_editor_is_not_a_spawn_failure() {
        let launcher = coordinator(Arc::new(NoExtraArgs));
        let result = launcher
            .launch(&LaunchRequest::new("/p", "2022.3.1"))
            .await;
        assert!(matches!(result, Err(LaunchError::EditorNotFound { .. })));
    }
}
