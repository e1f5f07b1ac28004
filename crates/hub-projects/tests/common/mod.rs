#![allow(dead_code)]

use hub_projects::HubPaths;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A hub data directory with `projects-v1.json` holding `data`.
pub fn hub_with_registry(data: &str) -> (TempDir, HubPaths) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let paths = HubPaths::with_data_dir(dir.path());
    fs::write(
        paths.projects_file(),
        format!(r#"{{"schema_version":"v1","data":{}}}"#, data),
    )
    .expect("failed to write registry");
    (dir, paths)
}

/// Create a project directory with a `ProjectVersion.txt`.
pub fn project_with_version(root: &Path, name: &str, version: &str) -> PathBuf {
    let path = root.join(name);
    fs::create_dir_all(path.join("ProjectSettings")).expect("failed to create project");
    fs::write(
        path.join("ProjectSettings/ProjectVersion.txt"),
        format!("m_EditorVersion: {}\n", version),
    )
    .expect("failed to write version");
    path
}

/// JSON string literal for a path, escaping backslashes.
pub fn json_path(path: &Path) -> String {
    serde_json::to_string(&path.to_string_lossy()).expect("failed to encode path")
}
