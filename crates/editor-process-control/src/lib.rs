//! Discovery and control of running editor processes.
//!
//! - [`ProcessDirectory`] lists editor processes and the project each one has open.
//! - [`ProcessControl`] probes liveness and delivers terminate/kill signals.
//! - [`WindowControl`] focuses an editor window and, where the platform allows,
//!   asks it to quit the way a user would.
//!
//! [`Platform::for_current_platform`] selects the implementations for the
//! host OS once at startup.

mod command;
pub mod command_line;
mod control;
mod directory;
mod error;
pub mod platform;
mod powershell;
mod process;
mod ps;
#[cfg(unix)]
mod signals;
mod taskkill;
mod window;

pub use control::{Liveness, ProcessControl, SignalDelivery};
pub use directory::ProcessDirectory;
pub use error::{ProcessControlError, ProcessQueryError, WindowControlError};
pub use platform::Platform;
pub use powershell::PowerShellProcessDirectory;
pub use process::{normalize_project_path, ManagedProcess};
pub use ps::PsProcessDirectory;
#[cfg(unix)]
pub use signals::UnixProcessControl;
pub use taskkill::TaskkillProcessControl;
pub use window::{
    AppleScriptWindowControl, NoWindowControl, PowerShellWindowControl, WindowControl,
    XdotoolWindowControl,
};
