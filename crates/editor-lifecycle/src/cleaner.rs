use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the editor's transient cache directory under the project root.
pub const CACHE_DIR_NAME: &str = "Temp";

/// Deletes a project's transient cache.
///
/// Callers must only invoke this when no editor process owns the project.
#[async_trait]
pub trait CacheCleaner: Send + Sync {
    /// Best-effort delete. Never fails outward.
    async fn clean(&self, project_path: &Path);
}

/// Removes `<project>/Temp` recursively.
#[derive(Debug, Clone, Default)]
pub struct TempCleaner;

impl TempCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn cache_dir(project_path: &Path) -> PathBuf {
        project_path.join(CACHE_DIR_NAME)
    }
}

#[async_trait]
impl CacheCleaner for TempCleaner {
    async fn clean(&self, project_path: &Path) {
        let cache_dir = Self::cache_dir(project_path);
        match tokio::fs::remove_dir_all(&cache_dir).await {
            Ok(()) => debug!(path = %cache_dir.display(), "removed editor cache"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %cache_dir.display(),
                error = %e,
                "failed to remove editor cache"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_cache_tree() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Temp/Bee/artifacts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("a.bin"), b"x").unwrap();
        std::fs::write(dir.path().join("Temp/UnityLockfile"), b"").unwrap();

        TempCleaner::new().clean(dir.path()).await;

        assert!(!dir.path().join("Temp").exists());
        assert!(dir.path().exists());
    }

    #[tokio::test]
    async fn absent_cache_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        TempCleaner::new().clean(dir.path()).await;
        TempCleaner::new().clean(dir.path()).await;
        assert!(!dir.path().join("Temp").exists());
    }

    #[tokio::test]
    async fn leaves_other_directories_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Assets")).unwrap();
        std::fs::create_dir_all(dir.path().join("Temp")).unwrap();

        TempCleaner::new().clean(dir.path()).await;

        assert!(dir.path().join("Assets").exists());
    }
}
