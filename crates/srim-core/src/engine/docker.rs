use super::config::{DEFAULT_COMPAT_LAYER, DEFAULT_VIRTUAL_DISPLAY, DockerConfig};
use super::error::ExecutorError;
use super::executor::Executor;
use super::process;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, instrument};

/// Extensions of the files copied out of the container after a run: SRIM rewrites its `.IN`
/// decks and writes every report as `.txt`.
pub const OUTPUT_EXTENSIONS: [&str; 2] = ["IN", "txt"];

/// Runs SRIM inside a container image that ships Wine and a SRIM installation.
///
/// The host io-directory is mounted into the container; a generated bash script copies it
/// beside the executable, runs SRIM, and copies the recognised outputs back to the mount.
#[derive(Debug, Clone, Default)]
pub struct DockerExecutor {
    config: DockerConfig,
}

impl DockerExecutor {
    pub fn new(config: DockerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DockerConfig {
        &self.config
    }

    /// In-container path of the executable located by `command`.
    pub fn container_executable(&self, command: &[&str]) -> String {
        let mut path = self.config.srim_directory.trim_end_matches('/').to_string();
        for part in command {
            path.push('/');
            path.push_str(part.trim_matches('/'));
        }
        path
    }

    /// The script the container runs for `executable`.
    pub fn entrypoint_script(&self, executable: &str) -> String {
        let bind = self.config.bind_path.trim_end_matches('/');
        format!(
            r#"
#!/usr/bin/env bash
set -eu
shopt -s extglob globstar nullglob
cp -R "{bind}/." .

# Run wine
{display} -a {wine} "{executable}"

# Copy outputs (recursively)
cp -n **/*.{{{extensions}}} "{bind}/" || true
"#,
            display = DEFAULT_VIRTUAL_DISPLAY,
            wine = DEFAULT_COMPAT_LAYER,
            extensions = OUTPUT_EXTENSIONS.join(","),
        )
    }

    /// Arguments passed to the container runtime to run `command` on `io_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::ResolvePath`] if `io_directory` cannot be made absolute.
    pub fn runtime_args(
        &self,
        io_directory: &Path,
        command: &[&str],
    ) -> Result<Vec<OsString>, ExecutorError> {
        let io_directory =
            std::path::absolute(io_directory).map_err(|e| ExecutorError::ResolvePath {
                path: io_directory.to_path_buf(),
                source: e,
            })?;
        let executable = self.container_executable(command);
        let workdir = match executable.rsplit_once('/') {
            Some(("", _)) | None => "/".to_string(),
            Some((parent, _)) => parent.to_string(),
        };

        let mut volume = io_directory.into_os_string();
        volume.push(":");
        volume.push(&self.config.bind_path);

        Ok(vec![
            "run".into(),
            "--rm".into(),
            "--volume".into(),
            volume,
            "--workdir".into(),
            workdir.into(),
            self.config.image.clone().into(),
            "bash".into(),
            "-c".into(),
            self.entrypoint_script(&executable).into(),
        ])
    }
}

impl Executor for DockerExecutor {
    #[instrument(skip_all, name = "docker_run", fields(image = %self.config.image, command = ?command))]
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError> {
        let args = self.runtime_args(io_directory, command)?;
        debug!("Container runtime: {}", &self.config.runtime);

        let mut cmd = Command::new(&self.config.runtime);
        cmd.args(&args);
        process::run_checked(&mut cmd)
    }
}
