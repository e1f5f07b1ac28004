use crate::command::run_captured;
use crate::error::WindowControlError;
use async_trait::async_trait;
use tracing::debug;

/// Brings editor windows forward and asks them to quit.
///
/// Everything here is best-effort; callers log failures and move on.
#[async_trait]
pub trait WindowControl: Send + Sync {
    /// Whether [`request_quit`](Self::request_quit) can work on this platform.
    fn supports_cooperative_quit(&self) -> bool {
        false
    }

    /// Bring the window(s) of `pid` to the foreground.
    async fn focus(&self, pid: u32) -> Result<(), WindowControlError>;

    /// Ask the process to quit the way a user would, giving it the chance
    /// to save and release its lock.
    async fn request_quit(&self, _pid: u32) -> Result<(), WindowControlError> {
        Err(WindowControlError::Unsupported)
    }
}

async fn run_helper(program: &str, args: &[&str]) -> Result<String, WindowControlError> {
    let output = run_captured(program, args)
        .await
        .map_err(|source| WindowControlError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.success {
        return Err(WindowControlError::Failed {
            program: program.to_string(),
            exit_code: output.exit_code,
            stderr: output.stderr,
        });
    }
    Ok(output.stdout)
}

/// macOS: System Events via `osascript`.
#[derive(Debug, Clone, Default)]
pub struct AppleScriptWindowControl;

impl AppleScriptWindowControl {
    pub fn new() -> Self {
        Self
    }

    fn focus_script(pid: u32) -> String {
        format!(
            "tell application \"System Events\" to set frontmost of \
             (first process whose unix id is {}) to true",
            pid
        )
    }

    fn quit_script(pid: u32) -> String {
        format!(
            "{}\ndelay 0.2\ntell application \"System Events\" to keystroke \"q\" using command down",
            Self::focus_script(pid)
        )
    }
}

#[async_trait]
impl WindowControl for AppleScriptWindowControl {
    fn supports_cooperative_quit(&self) -> bool {
        true
    }

    async fn focus(&self, pid: u32) -> Result<(), WindowControlError> {
        let script = Self::focus_script(pid);
        run_helper("osascript", &["-e", script.as_str()]).await?;
        debug!(pid, "focused editor window");
        Ok(())
    }

    async fn request_quit(&self, pid: u32) -> Result<(), WindowControlError> {
        let script = Self::quit_script(pid);
        run_helper("osascript", &["-e", script.as_str()]).await?;
        debug!(pid, "sent quit keystroke");
        Ok(())
    }
}

/// Windows: `WScript.Shell.AppActivate` through PowerShell.
#[derive(Debug, Clone, Default)]
pub struct PowerShellWindowControl;

impl PowerShellWindowControl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WindowControl for PowerShellWindowControl {
    async fn focus(&self, pid: u32) -> Result<(), WindowControlError> {
        let script = format!(
            "(New-Object -ComObject WScript.Shell).AppActivate({}) | Out-Null",
            pid
        );
        run_helper(
            "powershell",
            &["-NoProfile", "-NonInteractive", "-Command", script.as_str()],
        )
        .await?;
        debug!(pid, "focused editor window");
        Ok(())
    }
}

/// Linux/X11: `xdotool`.
#[derive(Debug, Clone, Default)]
pub struct XdotoolWindowControl;

impl XdotoolWindowControl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WindowControl for XdotoolWindowControl {
    async fn focus(&self, pid: u32) -> Result<(), WindowControlError> {
        let pid_arg = pid.to_string();
        run_helper(
            "xdotool",
            &["search", "--onlyvisible", "--pid", pid_arg.as_str(), "windowactivate"],
        )
        .await?;
        debug!(pid, "focused editor window");
        Ok(())
    }
}

/// Does nothing. For hosts without a window helper, and tests.
#[derive(Debug, Clone, Default)]
pub struct NoWindowControl;

#[async_trait]
impl WindowControl for NoWindowControl {
    async fn focus(&self, _pid: u32) -> Result<(), WindowControlError> {
        Err(WindowControlError::Unsupported)
    }
}
