//! The lock marker the editor keeps while a project is open.

use std::path::{Path, PathBuf};

/// Marker path relative to the project root.
pub const LOCK_MARKER_RELATIVE: &str = "Temp/UnityLockfile";

/// Absolute path of the lock marker for `project_path`.
pub fn lock_marker_path(project_path: &Path) -> PathBuf {
    project_path.join(LOCK_MARKER_RELATIVE)
}

/// Whether the lock marker exists.
pub fn is_lock_present(project_path: &Path) -> bool {
    lock_marker_path(project_path).exists()
}

/// Remove the lock marker. A marker that is already gone is success.
pub async fn remove_lock_marker(project_path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(lock_marker_path(project_path)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
