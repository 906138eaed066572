//! # Workflows Module
//!
//! Entry points that take a simulation from input files to parsed results.
//!
//! - [`run::run`] picks the pipeline for a [`crate::core::simulation::Simulation`], prepares the
//!   io-directory, and drives it through an executor.
//! - [`run::run_pipeline`] runs any [`crate::core::pipeline::Pipeline`]: generate, execute, parse.

pub mod run;
