use crate::error::{HubError, HubResult};
use crate::paths::HubPaths;
use std::path::PathBuf;

/// The user-chosen editor install location, if any.
///
/// The hub stores it as a bare JSON string; an empty string means unset.
pub fn secondary_install_path(paths: &HubPaths) -> HubResult<Option<PathBuf>> {
    let file = paths.secondary_install_file();
    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(HubError::io(file, e)),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: String = serde_json::from_str(&content).map_err(|e| HubError::parse(&file, e))?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| PathBuf::from(value)))
}
