//! Command-line interface for mora.
//!
//! This module defines the CLI surface and dispatches subcommands onto
//! the pipeline.

mod commands;

pub use commands::{Cli, Commands, run_command};
