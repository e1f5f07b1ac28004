use editor_process_control::ProcessQueryError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from admission, termination and status queries.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The process listing could not be obtained, so no decision was made.
    #[error("could not list running editors: {0}")]
    ProcessQueryFailed(#[from] ProcessQueryError),
}

/// Errors from launching an editor.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("editor {version} is not installed (tried: {})", display_paths(tried))]
    EditorNotFound { version: String, tried: Vec<PathBuf> },

    #[error("failed to start {}: {source}", binary.display())]
    SpawnFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no install roots configured".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_not_found_lists_every_path() {
        let e = LaunchError::EditorNotFound {
            version: "2022.3.1f1".to_string(),
            tried: vec![
                PathBuf::from("/a/2022.3.1f1/Editor/Unity"),
                PathBuf::from("/b/2022.3.1f1/Editor/Unity"),
            ],
        };
        let message = e.to_string();
        assert!(message.contains("2022.3.1f1"));
        assert!(message.contains("/a/2022.3.1f1/Editor/Unity"));
        assert!(message.contains("/b/2022.3.1f1/Editor/Unity"));
    }

    #[test]
    fn editor_not_found_without_roots() {
        let e = LaunchError::EditorNotFound {
            version: "6000.0.1f1".to_string(),
            tried: Vec::new(),
        };
        assert!(e.to_string().contains("no install roots"));
    }

    #[test]
    fn query_failure_converts() {
        let e: LifecycleError = ProcessQueryError::Failed {
            command: "ps".to_string(),
            exit_code: Some(1),
            stderr: "boom".to_string(),
        }
        .into();
        assert!(e.to_string().contains("boom"));
    }
}
