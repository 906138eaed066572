use super::docker::DockerExecutor;
use super::error::ExecutorError;
use super::native::NativeExecutor;
use std::path::Path;

/// Runs one SRIM executable against an io-directory.
///
/// Implementations resolve `command` (path segments relative to their own executable root),
/// make the files of `io_directory` available to the executable, run it to completion and
/// leave the outputs they recover in `io_directory`. A failed run copies nothing back.
pub trait Executor {
    /// Runs the executable located by `command` on the files in `io_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::ExecutableNotFound`] when the executable cannot be located,
    /// [`ExecutorError::ProcessFailed`] when the process exits unsuccessfully, and
    /// filesystem errors raised while moving files around.
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError> {
        (**self).run_command(io_directory, command)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError> {
        (**self).run_command(io_directory, command)
    }
}

/// An executor chosen at runtime.
#[derive(Debug, Clone)]
pub enum Backend {
    Native(NativeExecutor),
    Docker(DockerExecutor),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Native(_) => "native",
            Backend::Docker(_) => "docker",
        }
    }
}

impl Executor for Backend {
    fn run_command(&self, io_directory: &Path, command: &[&str]) -> Result<(), ExecutorError> {
        match self {
            Backend::Native(executor) => executor.run_command(io_directory, command),
            Backend::Docker(executor) => executor.run_command(io_directory, command),
        }
    }
}

impl From<NativeExecutor> for Backend {
    fn from(executor: NativeExecutor) -> Self {
        Backend::Native(executor)
    }
}

impl From<DockerExecutor> for Backend {
    fn from(executor: DockerExecutor) -> Self {
        Backend::Docker(executor)
    }
}
