use serde::Serialize;
use std::fmt;

/// Derived per-project state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Idle,
    Running,
    /// Lock marker left behind without a running editor.
    Crashed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Crashed => "crashed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

pub fn derive_status(process_found: bool, lock_present: bool) -> ProjectStatus {
    match (process_found, lock_present) {
        (true, _) => ProjectStatus::Running,
        (false, true) => ProjectStatus::Crashed,
        (false, false) => ProjectStatus::Idle,
    }
}
