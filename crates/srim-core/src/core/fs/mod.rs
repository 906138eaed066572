//! Filesystem primitives used around a tool invocation.
//!
//! [`cwd`] switches the process working directory for the span of a closure, and [`sync`]
//! copies files between directories, either wholesale or limited to those a bracketed
//! operation created or modified.

pub mod cwd;
pub mod sync;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Failed to read directory '{path}': {source}", path = path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read metadata of '{path}': {source}", path = path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}", from = from.display(), to = to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to determine the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Failed to change working directory to '{path}': {source}", path = path.display())]
    ChangeDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
