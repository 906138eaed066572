//! # Core Module
//!
//! Building blocks shared by every execution backend.
//!
//! - **Filesystem** ([`fs`]) - Scoped working-directory changes and snapshot-based file copying
//! - **Pipelines** ([`pipeline`]) - The (generator, parser, command) triple for one run
//! - **Simulations** ([`simulation`]) - The closed set of simulation kinds SRIM supports
//! - **File I/O** ([`io`]) - Input decks written before a run and reports read after it

pub mod fs;
pub mod io;
pub mod pipeline;
pub mod simulation;
