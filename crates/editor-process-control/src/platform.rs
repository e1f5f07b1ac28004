//! Host platform selection.

use crate::control::ProcessControl;
use crate::directory::ProcessDirectory;
use crate::window::WindowControl;
use std::sync::Arc;

/// The process directory, signal delivery and window control for one host.
#[derive(Clone)]
pub struct Platform {
    pub directory: Arc<dyn ProcessDirectory>,
    pub control: Arc<dyn ProcessControl>,
    pub windows: Arc<dyn WindowControl>,
}

impl Platform {
    pub fn new(
        directory: Arc<dyn ProcessDirectory>,
        control: Arc<dyn ProcessControl>,
        windows: Arc<dyn WindowControl>,
    ) -> Self {
        Self {
            directory,
            control,
            windows,
        }
    }

    /// Implementations for the OS this binary was built for.
    #[cfg(target_os = "macos")]
    pub fn for_current_platform() -> Self {
        Self::new(
            Arc::new(crate::PsProcessDirectory::new()),
            Arc::new(crate::UnixProcessControl::new()),
            Arc::new(crate::AppleScriptWindowControl::new()),
        )
    }

    /// Implementations for the OS this binary was built for.
    #[cfg(windows)]
    pub fn for_current_platform() -> Self {
        Self::new(
            Arc::new(crate::PowerShellProcessDirectory::new()),
            Arc::new(crate::TaskkillProcessControl::new()),
            Arc::new(crate::PowerShellWindowControl::new()),
        )
    }

    /// Implementations for the OS this binary was built for.
    #[cfg(all(unix, not(target_os = "macos")))]
    pub fn for_current_platform() -> Self {
        Self::new(
            Arc::new(crate::PsProcessDirectory::new()),
            Arc::new(crate::UnixProcessControl::new()),
            Arc::new(crate::XdotoolWindowControl::new()),
        )
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field(
                "cooperative_quit",
                &self.windows.supports_cooperative_quit(),
            )
            .finish_non_exhaustive()
    }
}
