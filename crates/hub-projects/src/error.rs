use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing hub data files.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed hub file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("project {} is not in the hub registry", .0.display())]
    UnknownProject(PathBuf),

    #[error("hub data directory could not be determined")]
    NoDataDir,
}

pub type HubResult<T> = Result<T, HubError>;

impl HubError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
