use crate::command::{describe, run_captured};
use crate::command_line::managed_process_from;
use crate::directory::ProcessDirectory;
use crate::error::ProcessQueryError;
use crate::process::ManagedProcess;
use async_trait::async_trait;
use tracing::{debug, trace};

const PS_PROGRAM: &str = "ps";
/// All processes, unlimited width, pid and full argument list.
const PS_ARGS: &[&str] = &["-A", "-ww", "-o", "pid=,args="];

/// Process directory backed by `ps` (macOS and Linux).
#[derive(Debug, Clone, Default)]
pub struct PsProcessDirectory;

impl PsProcessDirectory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessDirectory for PsProcessDirectory {
    async fn list_managed_processes(&self) -> Result<Vec<ManagedProcess>, ProcessQueryError> {
        let command = describe(PS_PROGRAM, PS_ARGS);
        let output = run_captured(PS_PROGRAM, PS_ARGS)
            .await
            .map_err(|source| ProcessQueryError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.success {
            return Err(ProcessQueryError::Failed {
                command,
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let processes = parse_ps_output(&output.stdout);
        debug!(count = processes.len(), "listed editor processes");
        Ok(processes)
    }
}

/// Parse `pid args...` rows into managed editor processes.
pub(crate) fn parse_ps_output(stdout: &str) -> Vec<ManagedProcess> {
    stdout
        .lines()
        .filter_map(|raw| {
            let line = raw.trim_start();
            let split = line.find(char::is_whitespace)?;
            let pid = line[..split].parse::<u32>().ok()?;
            let args = line[split..].trim();
            let process = managed_process_from(pid, args);
            if process.is_some() {
                trace!(pid, args, "matched editor process");
            }
            process
        })
        .collect()
}
