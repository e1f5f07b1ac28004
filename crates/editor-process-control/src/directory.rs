use crate::error::ProcessQueryError;
use crate::process::ManagedProcess;
use async_trait::async_trait;
use std::path::Path;

/// Enumerates running editor sessions.
///
/// Implementations must return `Err` when the OS listing itself fails; an
/// unreliable listing must never look like "no editor running".
#[async_trait]
pub trait ProcessDirectory: Send + Sync {
    /// All interactive editor processes with a project open.
    async fn list_managed_processes(&self) -> Result<Vec<ManagedProcess>, ProcessQueryError>;

    /// The editor process that has `project_path` open, if any.
    async fn find_by_project_path(
        &self,
        project_path: &Path,
    ) -> Result<Option<ManagedProcess>, ProcessQueryError> {
        let processes = self.list_managed_processes().await?;
        Ok(processes
            .into_iter()
            .find(|process| process.matches_project(project_path)))
    }
}
