//! mora - download FLAC music from the hifi catalog.
//!
//! Searches an external music catalog by track, album, or artist, lets
//! the user pick a match, streams the lossless asset to disk, and embeds
//! metadata and cover art into the resulting file.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod selector;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("mora=info".parse().unwrap()))
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    // Exit codes are part of the CLI contract; see error.rs for the table.
    let code = match cli::run_command(&rt, &args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}
