//! The hub's project list (`projects-v1.json`).

use crate::error::{HubError, HubResult};
use crate::fs_util::write_atomic;
use crate::paths::HubPaths;
use crate::version::read_project_version;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use editor_lifecycle::{BoxError, LaunchRecorder};
use editor_process_control::normalize_project_path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A project known to the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubProject {
    pub title: String,
    pub path: PathBuf,
    /// Editor version the project was last opened with.
    pub version: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub favorite: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    title: Option<String>,
    path: Option<String>,
    version: Option<String>,
    last_modified: Option<i64>,
    #[serde(default)]
    is_favorite: bool,
}

impl RawEntry {
    fn into_project(self, key: &str) -> HubProject {
        let path = PathBuf::from(self.path.unwrap_or_else(|| key.to_string()));
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| key.to_string());
        let version = self
            .version
            .filter(|v| !v.trim().is_empty())
            .or_else(|| read_project_version(&path));
        let last_modified = self
            .last_modified
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());

        HubProject {
            title,
            path,
            version,
            last_modified,
            favorite: self.is_favorite,
        }
    }
}

/// Reads and updates `projects-v1.json`.
#[derive(Debug, Clone)]
pub struct HubProjectRegistry {
    file: PathBuf,
}

impl HubProjectRegistry {
    pub fn new(paths: &HubPaths) -> Self {
        Self::from_file(paths.projects_file())
    }

    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// All registered projects, in file order. A missing file is an empty
    /// registry.
    pub fn load(&self) -> HubResult<Vec<HubProject>> {
        let Some(document) = self.read_document()? else {
            debug!(path = %self.file.display(), "no hub registry yet");
            return Ok(Vec::new());
        };

        let Some(data) = document.get("data").and_then(Value::as_object) else {
            return Ok(Vec::new());
        };

        let projects = data
            .iter()
            .filter_map(|(key, value)| {
                match RawEntry::deserialize(value) {
                    Ok(entry) => Some(entry.into_project(key)),
                    Err(e) => {
                        warn!(key, error = %e, "skipping malformed registry entry");
                        None
                    }
                }
            })
            .collect();
        Ok(projects)
    }

    /// Set `lastModified` for the project to `at`, keeping every other field.
    pub fn mark_launched_at(&self, project_path: &Path, at: DateTime<Utc>) -> HubResult<()> {
        let mut document = self
            .read_document()?
            .ok_or_else(|| HubError::UnknownProject(project_path.to_path_buf()))?;

        let entry = document
            .get_mut("data")
            .and_then(Value::as_object_mut)
            .and_then(|data| find_entry(data, project_path))
            .ok_or_else(|| HubError::UnknownProject(project_path.to_path_buf()))?;
        entry.insert(
            "lastModified".to_string(),
            Value::from(at.timestamp_millis()),
        );

        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| HubError::parse(&self.file, e))?;
        write_atomic(&self.file, &content)?;
        debug!(project = %project_path.display(), "recorded launch time");
        Ok(())
    }

    fn read_document(&self) -> HubResult<Option<Value>> {
        let content = match std::fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HubError::io(&self.file, e)),
        };
        let document =
            serde_json::from_str(&content).map_err(|e| HubError::parse(&self.file, e))?;
        Ok(Some(document))
    }
}

/// The entry whose key or `path` field names `project_path`.
fn find_entry<'a>(
    data: &'a mut Map<String, Value>,
    project_path: &Path,
) -> Option<&'a mut Map<String, Value>> {
    let wanted = normalize_project_path(project_path);
    data.iter_mut()
        .find(|(key, value)| {
            let path = value
                .get("path")
                .and_then(Value::as_str)
                .unwrap_or(key.as_str());
            normalize_project_path(Path::new(path)) == wanted
        })
        .and_then(|(_, value)| value.as_object_mut())
}

#[async_trait]
impl LaunchRecorder for HubProjectRegistry {
    async fn mark_launched(&self, project_path: &Path, at: DateTime<Utc>) -> Result<(), BoxError> {
        self.mark_launched_at(project_path, at)?;
        Ok(())
    }
}
