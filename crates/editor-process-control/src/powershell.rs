use crate::command::run_captured;
use crate::command_line::{managed_process_from, WINDOWS_EDITOR_IMAGE};
use crate::directory::ProcessDirectory;
use crate::error::ProcessQueryError;
use crate::process::ManagedProcess;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Process directory backed by a PowerShell CIM query (Windows).
#[derive(Debug, Clone, Default)]
pub struct PowerShellProcessDirectory;

impl PowerShellProcessDirectory {
    pub fn new() -> Self {
        Self
    }

    fn query_script() -> String {
        format!(
            "Get-CimInstance Win32_Process -Filter \"Name = '{}'\" | \
             Select-Object ProcessId,CommandLine | ConvertTo-Json -Compress",
            WINDOWS_EDITOR_IMAGE
        )
    }
}

#[async_trait]
impl ProcessDirectory for PowerShellProcessDirectory {
    async fn list_managed_processes(&self) -> Result<Vec<ManagedProcess>, ProcessQueryError> {
        let script = Self::query_script();
        let args = ["-NoProfile", "-NonInteractive", "-Command", script.as_str()];

        // Windows PowerShell first, PowerShell 7 when the former is absent.
        let output = match run_captured("powershell", &args).await {
            Ok(output) => output,
            Err(first) => {
                warn!(error = %first, "powershell unavailable, trying pwsh");
                run_captured("pwsh", &args)
                    .await
                    .map_err(|source| ProcessQueryError::Spawn {
                        command: "pwsh Get-CimInstance Win32_Process".to_string(),
                        source,
                    })?
            }
        };

        if !output.success {
            return Err(ProcessQueryError::Failed {
                command: "powershell Get-CimInstance Win32_Process".to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let processes =
            parse_cim_json(&output.stdout).map_err(|source| ProcessQueryError::Parse {
                command: "Get-CimInstance Win32_Process".to_string(),
                source,
            })?;
        debug!(count = processes.len(), "listed editor processes");
        Ok(processes)
    }
}

/// One row of `Win32_Process` as emitted by `ConvertTo-Json`.
#[derive(Debug, Deserialize)]
struct CimProcess {
    #[serde(rename = "ProcessId")]
    pid: u32,
    #[serde(rename = "CommandLine")]
    command_line: Option<String>,
}

/// `ConvertTo-Json` unwraps a single-element pipeline into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CimOutput {
    Many(Vec<CimProcess>),
    One(CimProcess),
}

/// Parse the CIM query's JSON. No output means no editor is running.
pub(crate) fn parse_cim_json(stdout: &str) -> Result<Vec<ManagedProcess>, serde_json::Error> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Ok(Vec::new());
    }

    let rows = match serde_json::from_str::<CimOutput>(stdout)? {
        CimOutput::Many(rows) => rows,
        CimOutput::One(row) => vec![row],
    };
    Ok(rows
        .into_iter()
        .filter_map(|row| managed_process_from(row.pid, row.command_line.as_deref()?))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_process_array() {
        let stdout = r#"[{"ProcessId":4120,"CommandLine":"\"C:\\Program Files\\Unity\\Hub\\Editor\\2022.3.1f1\\Editor\\Unity.exe\" -projectpath \"C:\\Work\\My Game\" -useHub -hubIPC"},{"ProcessId":4388,"CommandLine":"\"C:\\Program Files\\Unity\\Hub\\Editor\\2022.3.1f1\\Editor\\Unity.exe\" -adb2 -batchMode -name AssetImportWorker1 -projectPath C:\\Work\\My Game"},{"ProcessId":5000,"CommandLine":null}]"#;

        let processes = parse_cim_json(stdout).unwrap();
        assert_eq!(processes, vec![ManagedProcess::new(4120, r"C:\Work\My Game")]);
    }

    #[test]
    fn parses_single_object() {
        let stdout = r#"{"ProcessId":77,"CommandLine":"C:\\Unity\\2021.3.9f1\\Editor\\Unity.exe -projectPath C:\\Work\\Racer"}
"#;

        let processes = parse_cim_json(stdout).unwrap();
        assert_eq!(processes, vec![ManagedProcess::new(77, r"C:\Work\Racer")]);
    }

    #[test]
    fn command_line_with_newline_stays_one_process() {
        let stdout = r#"{"ProcessId":12,"CommandLine":"C:\\Unity\\Editor\\Unity.exe -projectPath C:\\Work\\Racer\r\n -useHub"}"#;

        let processes = parse_cim_json(stdout).unwrap();
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].pid, 12);
    }

    #[test]
    fn empty_output_is_no_processes() {
        assert!(parse_cim_json("").unwrap().is_empty());
        assert!(parse_cim_json("  \r\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_output_is_an_error() {
        assert!(parse_cim_json("Get-CimInstance : Access denied").is_err());
        assert!(parse_cim_json(r#"{"ProcessId":"abc"}"#).is_err());
    }
}
