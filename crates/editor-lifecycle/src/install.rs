//! Locating installed editor versions.

use crate::error::LaunchError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Editor executable relative to `<install root>/<version>/`.
#[cfg(target_os = "macos")]
pub const EDITOR_BINARY_RELATIVE: &str = "Unity.app/Contents/MacOS/Unity";
#[cfg(windows)]
pub const EDITOR_BINARY_RELATIVE: &str = "Editor/Unity.exe";
#[cfg(all(unix, not(target_os = "macos")))]
pub const EDITOR_BINARY_RELATIVE: &str = "Editor/Unity";

/// Default hub install root(s) for this platform.
pub fn default_install_roots() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        vec![PathBuf::from("/Applications/Unity/Hub/Editor")]
    }
    #[cfg(windows)]
    {
        vec![PathBuf::from(r"C:\Program Files\Unity\Hub\Editor")]
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        dirs::home_dir()
            .map(|home| vec![home.join("Unity/Hub/Editor")])
            .unwrap_or_default()
    }
}

/// Ordered set of directories holding `<version>/` editor installs.
#[derive(Debug, Clone, Default)]
pub struct EditorInstallations {
    roots: Vec<PathBuf>,
}

impl EditorInstallations {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let mut installations = Self::default();
        for root in roots {
            installations.add_root(root);
        }
        installations
    }

    /// Append a root, ignoring duplicates.
    pub fn add_root(&mut self, root: PathBuf) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Binary path for `version` under `root`.
    pub fn candidate(root: &Path, version: &str) -> PathBuf {
        root.join(version).join(EDITOR_BINARY_RELATIVE)
    }

    /// First existing editor binary for `version`, probing roots in order.
    pub fn resolve_editor_path(&self, version: &str) -> Result<PathBuf, LaunchError> {
        let mut tried = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            let candidate = Self::candidate(root, version);
            if candidate.is_file() {
                debug!(version, path = %candidate.display(), "resolved editor");
                return Ok(candidate);
            }
            tried.push(candidate);
        }

        Err(LaunchError::EditorNotFound {
            version: version.to_string(),
            tried,
        })
    }
}
