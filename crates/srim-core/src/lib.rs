//! # srimrs Core Library
//!
//! Drives the SRIM ion-transport tool, which ships only as a Windows executable, through a
//! compatibility layer on the host or inside a container, and recovers the reports it writes.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Filesystem primitives (the working-directory scope manager and
//!   the differential file synchronizer), the pipeline descriptor, the closed set of simulation
//!   kinds, and the input/output collaborators for each kind.
//!
//! - **[`engine`]: The Execution Layer.** The [`engine::executor::Executor`] trait and its two
//!   backends, native (`wine` on the host) and containerized (`docker run`), together with their
//!   configuration, error types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Generate inputs, run the tool, parse outputs. The
//!   [`workflows::run::run`] entry point picks the right pipeline for a [`core::simulation::Simulation`].

pub mod core;
pub mod engine;
pub mod workflows;
