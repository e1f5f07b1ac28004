use crate::error::{HubError, HubResult};
use std::path::{Path, PathBuf};

const HUB_DIR_NAME: &str = "UnityHub";
const PROJECTS_FILE: &str = "projects-v1.json";
const PROJECTS_INFO_FILE: &str = "projectsInfo.json";
const SECONDARY_INSTALL_FILE: &str = "secondaryInstallPath.json";

/// Locations of the hub's data files.
#[derive(Debug, Clone)]
pub struct HubPaths {
    data_dir: PathBuf,
}

impl HubPaths {
    /// `<config dir>/UnityHub`.
    pub fn new() -> HubResult<Self> {
        let config_dir = dirs::config_dir().ok_or(HubError::NoDataDir)?;
        Ok(Self::with_data_dir(config_dir.join(HUB_DIR_NAME)))
    }

    /// Use `override_dir` when set, the platform default otherwise.
    pub fn resolve(override_dir: Option<&Path>) -> HubResult<Self> {
        match override_dir {
            Some(dir) => Ok(Self::with_data_dir(dir)),
            None => Self::new(),
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_FILE)
    }

    pub fn projects_info_file(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_INFO_FILE)
    }

    pub fn secondary_install_file(&self) -> PathBuf {
        self.data_dir.join(SECONDARY_INSTALL_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_locations() {
        let paths = HubPaths::with_data_dir("/hub");
        assert_eq!(paths.projects_file(), PathBuf::from("/hub/projects-v1.json"));
        assert_eq!(paths.projects_info_file(), PathBuf::from("/hub/projectsInfo.json"));
        assert_eq!(
            paths.secondary_install_file(),
            PathBuf::from("/hub/secondaryInstallPath.json")
        );
    }

    #[test]
    fn override_wins() {
        let paths = HubPaths::resolve(Some(Path::new("/custom"))).unwrap();
        assert_eq!(paths.data_dir(), Path::new("/custom"));
    }
}
