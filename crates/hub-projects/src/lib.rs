//! Access to the editor hub's on-disk data.
//!
//! The hub keeps its project list in `projects-v1.json`, per-project launch
//! arguments in `projectsInfo.json` and an optional extra install location in
//! `secondaryInstallPath.json`, all under [`HubPaths::data_dir`].
//! [`HubProjectRegistry`] doubles as the [`LaunchRecorder`] and
//! [`HubProjectSettings`] as the [`ExtraArgsSource`] for launches.
//!
//! [`LaunchRecorder`]: editor_lifecycle::LaunchRecorder
//! [`ExtraArgsSource`]: editor_lifecycle::ExtraArgsSource

mod branch;
mod error;
mod fs_util;
mod install;
mod paths;
mod registry;
mod settings;
mod sort;
mod version;

pub use branch::current_branch;
pub use error::{HubError, HubResult};
pub use install::secondary_install_path;
pub use paths::HubPaths;
pub use registry::{HubProject, HubProjectRegistry};
pub use settings::HubProjectSettings;
pub use sort::{filter_projects, sort_projects};
pub use version::read_project_version;
