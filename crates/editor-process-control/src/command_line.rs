//! Recognizing editor command lines and pulling the project path out of them.

use crate::process::ManagedProcess;

/// Flag the editor takes its project directory from.
pub const PROJECT_PATH_FLAG: &str = "-projectPath";

/// Image name of the editor on Windows.
pub const WINDOWS_EDITOR_IMAGE: &str = "Unity.exe";

/// Path suffixes identifying the editor executable, compared against the
/// lowercased leading executable with `\` unified to `/`.
const EDITOR_EXECUTABLE_SUFFIXES: &[&str] = &[
    "unity.app/contents/macos/unity",
    "/editor/unity.exe",
    "/editor/unity",
];

/// Marker carried by the editor's batch-mode asset import helpers.
const IMPORT_WORKER_MARKER: &str = "assetimportworker";

/// Turn one `(pid, command line)` row into a managed process, if it is an
/// interactive editor session with a project open.
pub fn managed_process_from(pid: u32, command_line: &str) -> Option<ManagedProcess> {
    if !is_editor_command(command_line) || is_import_worker(command_line) {
        return None;
    }
    let project_path = extract_project_path(command_line)?;
    Some(ManagedProcess::new(pid, project_path))
}

/// Whether the command line runs the editor executable.
///
/// Only the leading executable counts, so a shell or wrapper that merely
/// mentions the editor in its arguments is not an editor.
pub fn is_editor_command(command_line: &str) -> bool {
    let executable = leading_executable(command_line);
    if !looks_like_path(executable) {
        return false;
    }

    let executable = executable.to_ascii_lowercase().replace('\\', "/");
    EDITOR_EXECUTABLE_SUFFIXES
        .iter()
        .any(|suffix| executable.ends_with(suffix))
}

/// The executable at the head of a command line. A quoted executable ends
/// at its closing quote; a bare one may contain spaces and runs to the
/// first ` -flag`.
fn leading_executable(command_line: &str) -> &str {
    let trimmed = command_line.trim_start();
    match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &trimmed[1..];
            inner.find(quote).map_or(inner, |close| &inner[..close])
        }
        _ => bare_value(trimmed).trim_end(),
    }
}

/// Absolute, relative or drive-letter path, as opposed to a program name
/// resolved through `PATH`.
fn looks_like_path(executable: &str) -> bool {
    let bytes = executable.as_bytes();
    match bytes {
        [b'/' | b'\\' | b'.' | b'~', ..] => true,
        [drive, b':', b'\\' | b'/', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Whether the command line belongs to an asset import worker.
pub fn is_import_worker(command_line: &str) -> bool {
    command_line
        .to_ascii_lowercase()
        .contains(IMPORT_WORKER_MARKER)
}

/// Extract the value following `-projectPath`.
///
/// The flag matches case-insensitively. The value may be double-quoted,
/// single-quoted or bare. A bare value may contain spaces (process listings
/// drop the original quoting) and ends at the next ` -flag` or end of line.
pub fn extract_project_path(command_line: &str) -> Option<String> {
    let flag_end = find_flag(command_line, PROJECT_PATH_FLAG)?;
    let rest = command_line[flag_end..].trim_start();

    let value = match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            match inner.find(quote) {
                Some(close) => &inner[..close],
                None => inner,
            }
        }
        _ => bare_value(rest),
    };

    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Byte offset just past a whitespace-delimited occurrence of `flag`.
fn find_flag(command_line: &str, flag: &str) -> Option<usize> {
    let haystack = command_line.to_ascii_lowercase();
    let needle = flag.to_ascii_lowercase();

    haystack.match_indices(&needle).find_map(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == '"');
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(false, char::is_whitespace);
        (before_ok && after_ok).then_some(end)
    })
}

/// A bare value runs until whitespace followed by `-<letter>`.
fn bare_value(rest: &str) -> &str {
    let bytes = rest.as_bytes();
    for (i, window) in bytes.windows(3).enumerate() {
        if window[0].is_ascii_whitespace() && window[1] == b'-' && window[2].is_ascii_alphabetic() {
            return &rest[..i];
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC_EDITOR: &str = "/Applications/Unity/Hub/Editor/2022.3.1f1/Unity.app/Contents/MacOS/Unity";

    #[test]
    fn extracts_bare_project_path() {
        let cmd = format!("{MAC_EDITOR} -projectPath /Users/dev/Game");
        assert_eq!(extract_project_path(&cmd).as_deref(), Some("/Users/dev/Game"));
    }

    #[test]
    fn extracts_double_quoted_project_path() {
        let cmd = r#""C:\Program Files\Unity\Hub\Editor\2022.3.1f1\Editor\Unity.exe" -projectPath "C:\Work\My Game" -useHub"#;
        assert_eq!(extract_project_path(cmd).as_deref(), Some(r"C:\Work\My Game"));
    }

    #[test]
    fn extracts_single_quoted_project_path() {
        let cmd = format!("{MAC_EDITOR} -projectPath '/Users/dev/My Game' -logFile -");
        assert_eq!(extract_project_path(&cmd).as_deref(), Some("/Users/dev/My Game"));
    }

    #[test]
    fn bare_path_with_spaces_runs_to_next_flag() {
        let cmd = format!("{MAC_EDITOR} -projectPath /Users/dev/My Game - Copy -useHub -hubIPC");
        assert_eq!(
            extract_project_path(&cmd).as_deref(),
            Some("/Users/dev/My Game - Copy")
        );
    }

    #[test]
    fn flag_matches_case_insensitively() {
        let cmd = format!("{MAC_EDITOR} -projectpath /Users/dev/Game");
        assert_eq!(extract_project_path(&cmd).as_deref(), Some("/Users/dev/Game"));
    }

    #[test]
    fn missing_or_empty_value_is_none() {
        assert_eq!(extract_project_path(MAC_EDITOR), None);
        assert_eq!(extract_project_path(&format!("{MAC_EDITOR} -projectPath ")), None);
        assert_eq!(extract_project_path(&format!("{MAC_EDITOR} -projectPath \"\"")), None);
    }

    #[test]
    fn flag_must_be_a_whole_word() {
        let cmd = format!("{MAC_EDITOR} -projectPathOverride /x");
        assert_eq!(extract_project_path(&cmd), None);
    }

    #[test]
    fn recognizes_editor_executables() {
        assert!(is_editor_command(&format!("{MAC_EDITOR} -projectPath /x")));
        assert!(is_editor_command(
            "/home/dev/Unity/Hub/Editor/2022.3.1f1/Editor/Unity -projectPath /x"
        ));
        assert!(is_editor_command(
            r#""C:\Program Files\Unity\Hub\Editor\6000.0.1f1\Editor\Unity.exe" -projectPath C:\x"#
        ));
    }

    #[test]
    fn rejects_lookalike_executables() {
        assert!(!is_editor_command("/opt/unityhub/unityhub-bin --no-sandbox"));
        assert!(!is_editor_command(
            "/home/dev/Unity/Hub/Editor/2022.3.1f1/Editor/UnityCrashHandler64 -projectPath /x"
        ));
        assert!(!is_editor_command("vim notes.txt"));
    }

    #[test]
    fn wrapper_shell_is_not_an_editor() {
        assert!(!is_editor_command(
            r#"sh -c "/opt/Unity/Hub/Editor/2022.3.1f1/Editor/Unity -projectPath /p""#
        ));
        assert!(!is_editor_command(
            "tail -f /opt/Unity/Hub/Editor/2022.3.1f1/Editor/Unity"
        ));
        assert_eq!(
            managed_process_from(
                9,
                r#"sh -c "/opt/Unity/Hub/Editor/2022.3.1f1/Editor/Unity -projectPath /p""#
            ),
            None
        );
    }

    #[test]
    fn bare_executable_may_contain_spaces() {
        assert!(is_editor_command(
            "/Users/dev/My Apps/Hub/Editor/2022.3.1f1/Unity.app/Contents/MacOS/Unity -projectPath /x"
        ));
        assert!(is_editor_command(
            r"C:\Program Files\Unity\Hub\Editor\6000.0.1f1\Editor\Unity.exe -projectPath C:\x"
        ));
        assert!(is_editor_command(MAC_EDITOR));
    }

    #[test]
    fn import_workers_are_not_managed() {
        let cmd = format!(
            "{MAC_EDITOR} -adb2 -batchMode -noUpm -name AssetImportWorker0 -projectPath /Users/dev/Game"
        );
        assert!(is_import_worker(&cmd));
        assert_eq!(managed_process_from(77, &cmd), None);
    }

    #[test]
    fn managed_process_from_interactive_editor() {
        let cmd = format!("{MAC_EDITOR} -projectPath /Users/dev/Game -useHub");
        assert_eq!(
            managed_process_from(42, &cmd),
            Some(ManagedProcess::new(42, "/Users/dev/Game"))
        );
    }

    #[test]
    fn managed_process_requires_project_path() {
        assert_eq!(managed_process_from(42, MAC_EDITOR), None);
    }
}
