//! # Wattwise
//!
//! Library half of the Wattwise binary: CLI commands, configuration and the
//! markdown report assembler. The calculations live in `wattwise-core`.

pub mod cli;
pub mod config;
pub mod report;
