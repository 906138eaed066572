use super::config::NativeConfig;
use super::error::ExecutorError;
use super::executor::Executor;
use super::process;
use crate::core::fs::sync::{copy_files, copy_new_files};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, instrument};

/// Runs SRIM from a local installation.
///
/// SRIM reads its inputs from, and writes its reports to, the directory holding the
/// executable. Inputs are therefore copied beside the executable first, and afterwards only
/// the files the run created or rewrote there are copied back to the io-directory.
#[derive(Debug, Clone)]
pub struct NativeExecutor {
    config: NativeConfig,
}

impl NativeExecutor {
    pub fn new(config: NativeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NativeConfig {
        &self.config
    }

    /// Absolute path of the executable located by `command` under the SRIM directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::ExecutableNotFound`] when nothing exists at that path.
    pub fn resolve_executable(&self, command: &[&str]) -> Result<PathBuf, ExecutorError> {
        let joined = command
            .iter()
            .fold(self.config.srim_directory.clone(), |path, part| path.join(part));
        let path = std::path::absolute(&joined).unwrap_or(joined);
        if !path.exists() {
            return Err(ExecutorError::ExecutableNotFound { path });
        }
        Ok(path)
    }

    /// Program and arguments that launch `executable` from its own directory.
    ///
    /// On unix hosts the executable runs through the compatibility layer, wrapped by the
    /// virtual-display program when one is configured and installed. Elsewhere it is started
    /// directly.
    pub fn subprocess_args(&self, executable: &Path) -> Vec<OsString> {
        let mut args = Vec::new();
        let file_name = executable
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| executable.as_os_str().to_os_string());

        if cfg!(unix) {
            if let Some(wrapper) = self
                .config
                .virtual_display
                .as_deref()
                .and_then(process::find_program)
            {
                args.push(wrapper.into_os_string());
                args.push(OsString::from("-a"));
            } else {
                debug!("No virtual display wrapper available; running without one.");
            }
            args.push(OsString::from(&self.config.compat_layer));
            args.push(file_name);
        } else {
            args.push(file_name);
        }
        args
    }
}

impl Executor for NativeExecutor {
    #[instrument(skip_all, name = "native_run", fields(command = ?command))]
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError> {
        let executable = self.resolve_executable(command)?;
        let working_directory = executable
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.srim_directory.clone());

        info!(
            "Staging inputs from {:?} into {:?}",
            io_directory, &working_directory
        );
        copy_files(io_directory, &working_directory)?;

        let args = self.subprocess_args(&executable);
        let Some((program, rest)) = args.split_first() else {
            return Err(ExecutorError::ExecutableNotFound { path: executable });
        };

        copy_new_files(&working_directory, io_directory, || {
            let mut cmd = Command::new(program);
            cmd.args(rest).current_dir(&working_directory);
            process::run_checked(&mut cmd)
        })
    }
}
