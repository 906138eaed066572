use super::error::ExecutorError;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Renders a command line for logs and error messages.
pub(crate) fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `command` to completion, inheriting stdio.
///
/// Blocks until the process exits. A non-zero exit becomes [`ExecutorError::ProcessFailed`].
pub(crate) fn run_checked(command: &mut Command) -> Result<(), ExecutorError> {
    let rendered = describe(command);
    match command.get_current_dir() {
        Some(dir) => info!("Running `{}` in {:?}", rendered, dir),
        None => info!("Running `{}`", rendered),
    }

    let status = command.status().map_err(|e| ExecutorError::Spawn {
        command: rendered.clone(),
        source: e,
    })?;

    if !status.success() {
        return Err(ExecutorError::ProcessFailed {
            command: rendered,
            status,
        });
    }
    debug!("`{}` exited successfully", rendered);
    Ok(())
}

/// Locates a program the way a shell would.
///
/// Names containing a path separator are checked directly; bare names are searched for in
/// every `PATH` entry.
pub(crate) fn find_program(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_joins_program_and_arguments() {
        let mut command = Command::new("wine");
        command.arg("TRIM.exe");
        assert_eq!(describe(&command), "wine TRIM.exe");
    }

    #[cfg(unix)]
    #[test]
    fn successful_process_returns_ok() {
        assert!(run_checked(&mut Command::new("true")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_process_reports_command_and_status() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 3"]);

        let err = run_checked(&mut command).unwrap_err();

        match err {
            ExecutorError::ProcessFailed { command, status } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut command = Command::new("definitely-not-a-real-srim-binary");
        let err = run_checked(&mut command).unwrap_err();
        assert!(matches!(err, ExecutorError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn find_program_searches_path() {
        assert!(find_program("sh").is_some());
        assert!(find_program("definitely-not-a-real-srim-binary").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn find_program_accepts_explicit_paths() {
        assert_eq!(find_program("/bin/sh"), Some(PathBuf::from("/bin/sh")));
        assert_eq!(find_program("/no/such/xvfb-run"), None);
    }
}
