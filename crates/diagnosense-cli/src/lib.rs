//! diagnosense-cli library root.
//!
//! Re-exports the argument, config, and command modules so integration
//! tests can exercise them without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
