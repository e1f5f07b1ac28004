use std::path::Path;

const PROJECT_VERSION_FILE: &str = "ProjectSettings/ProjectVersion.txt";
const EDITOR_VERSION_KEY: &str = "m_EditorVersion:";

/// Editor version recorded in the project's `ProjectVersion.txt`.
pub fn read_project_version(project_path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(project_path.join(PROJECT_VERSION_FILE)).ok()?;
    parse_project_version(&content)
}

fn parse_project_version(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix(EDITOR_VERSION_KEY)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
