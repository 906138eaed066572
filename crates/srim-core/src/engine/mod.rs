//! # Engine Module
//!
//! Runs SRIM executables and brings their reports back to the caller's io-directory.
//!
//! ## Architecture
//!
//! - **Executor contract** ([`executor`]) - The [`executor::Executor`] trait and the
//!   runtime-selectable [`executor::Backend`]
//! - **Native backend** ([`native`]) - Runs SRIM with Wine on the host
//! - **Containerized backend** ([`docker`]) - Runs SRIM inside a container image
//! - **Configuration** ([`config`]) - Immutable settings for each backend
//! - **Progress** ([`progress`]) - Phase reporting for front ends
//! - **Error Handling** ([`error`]) - Failures of every step of a run
//!
//! Backends hold only immutable configuration, so a single instance may serve several
//! io-directories at once.

pub mod config;
pub mod docker;
pub mod error;
pub mod executor;
pub mod native;
pub(crate) mod process;
pub mod progress;
