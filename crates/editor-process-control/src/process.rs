use std::path::{Path, PathBuf};

/// Whether project paths compare case-insensitively on this host.
pub(crate) const CASE_INSENSITIVE_PATHS: bool = cfg!(any(target_os = "macos", windows));

/// An editor process and the project it has open.
///
/// Produced fresh on every query. The pid may be recycled by the OS once the
/// process exits, so callers re-resolve instead of holding on to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedProcess {
    pub pid: u32,
    pub project_path: PathBuf,
}

impl ManagedProcess {
    pub fn new(pid: u32, project_path: impl Into<PathBuf>) -> Self {
        Self {
            pid,
            project_path: project_path.into(),
        }
    }

    /// Whether this process has `project_path` open.
    pub fn matches_project(&self, project_path: &Path) -> bool {
        normalize_project_path(&self.project_path) == normalize_project_path(project_path)
    }
}

/// Comparison key for a project path on this host.
///
/// Separators are unified to `/`, trailing separators dropped, and the
/// result is lowercased where the filesystem is case-insensitive.
pub fn normalize_project_path(path: &Path) -> String {
    normalize_with(&path.to_string_lossy(), CASE_INSENSITIVE_PATHS)
}

pub(crate) fn normalize_with(raw: &str, case_insensitive: bool) -> String {
    let unified = raw.trim().replace('\\', "/");
    let trimmed = unified.trim_end_matches('/');
    // Keep a bare root ("/") instead of collapsing it to "".
    let normalized = if trimmed.is_empty() && unified.starts_with('/') {
        "/"
    } else {
        trimmed
    };

    if case_insensitive {
        normalized.to_lowercase()
    } else {
        normalized.to_string()
    }
}
