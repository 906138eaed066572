//! File collaborators of a SRIM run.
//!
//! SRIM reads a single input deck from beside its executable and writes plain-text reports
//! next to it. [`inputs`] places the deck for each simulation kind and [`outputs`] gathers the
//! reports into typed results. Neither module interprets the physics inside the files.

pub mod inputs;
pub mod outputs;
