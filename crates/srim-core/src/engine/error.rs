use crate::core::fs::FsError;
use crate::core::io::outputs::ParseError;
use crate::core::simulation::UnsupportedKind;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("SRIM executable not found at '{path}'", path = path.display())]
    ExecutableNotFound { path: PathBuf },

    #[error("Command `{command}` failed with {status}")]
    ProcessFailed { command: String, status: ExitStatus },

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    UnsupportedInput(#[from] UnsupportedKind),

    #[error("Failed to generate input files: {0}")]
    InputGeneration(#[source] std::io::Error),

    #[error("Failed to create a temporary io-directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Failed to create io-directory '{path}': {source}", path = path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to resolve io-directory '{path}': {source}", path = path.display())]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FsError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
