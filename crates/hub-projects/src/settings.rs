//! Per-project settings kept by the hub (`projectsInfo.json`).

use crate::error::{HubError, HubResult};
use crate::paths::HubPaths;
use async_trait::async_trait;
use editor_lifecycle::{BoxError, ExtraArgsSource};
use editor_process_control::normalize_project_path;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectInfo {
    cli_args: Option<String>,
}

/// Source of the extra command-line arguments a user set for a project.
#[derive(Debug, Clone)]
pub struct HubProjectSettings {
    file: PathBuf,
}

impl HubProjectSettings {
    pub fn new(paths: &HubPaths) -> Self {
        Self::from_file(paths.projects_info_file())
    }

    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// The raw `cliArgs` string for the project. Missing file, entry or
    /// field is `None`.
    pub fn cli_args(&self, project_path: &Path) -> HubResult<Option<String>> {
        let content = match std::fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HubError::io(&self.file, e)),
        };
        let infos: HashMap<String, ProjectInfo> =
            serde_json::from_str(&content).map_err(|e| HubError::parse(&self.file, e))?;

        let wanted = normalize_project_path(project_path);
        Ok(infos
            .into_iter()
            .find(|(key, _)| normalize_project_path(Path::new(key)) == wanted)
            .and_then(|(_, info)| info.cli_args)
            .filter(|args| !args.trim().is_empty()))
    }
}

#[async_trait]
impl ExtraArgsSource for HubProjectSettings {
    async fn extra_args(&self, project_path: &Path) -> Result<Option<String>, BoxError> {
        Ok(self.cli_args(project_path)?)
    }
}
