//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `download`: the search-resolve-download pipeline

mod download;

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::catalog::domain::Quality;
use crate::error::Result;

pub use download::cmd_download;

/// mora CLI
#[derive(Parser)]
#[command(name = "mora", author, version, about = "Download FLAC music from the hifi catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and download one matching track
    #[command(group(ArgGroup::new("search_type").required(true)))]
    Download {
        /// Search for tracks by title
        #[arg(long, group = "search_type")]
        track: bool,
        /// Search for tracks by album title
        #[arg(long, group = "search_type")]
        album: bool,
        /// Search for tracks by exact artist name
        #[arg(long, group = "search_type")]
        artist: bool,
        /// Search term
        #[arg(short, long)]
        query: String,
        /// Audio quality to request (default LOSSLESS, or config override)
        #[arg(long, value_enum)]
        quality: Option<Quality>,
        /// Output directory (default ./downloads, or config override)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Take the most relevant match without prompting
        #[arg(long)]
        auto: bool,
    },
}

/// Run the specified CLI command on the given runtime.
pub fn run_command(rt: &Runtime, cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Download {
            track,
            album,
            artist,
            query,
            quality,
            output,
            auto,
        } => cmd_download(
            rt,
            download::SearchFlags {
                track: *track,
                album: *album,
                artist: *artist,
            },
            query,
            *quality,
            output.as_deref(),
            *auto,
        ),
    }
}
