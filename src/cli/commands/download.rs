//! The download command: wire the real clients into the pipeline.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;

use crate::catalog::domain::{Quality, SearchType};
use crate::catalog::hifi::HifiClient;
use crate::config;
use crate::downloader::{FetchOutcome, HttpTransfer};
use crate::error::{Error, Result};
use crate::pipeline::{Pipeline, PipelineRequest};
use crate::selector::{AutoPrompt, SelectionPrompt, TerminalPrompt};

/// The mutually exclusive search-type flags, as parsed.
pub struct SearchFlags {
    pub track: bool,
    pub album: bool,
    pub artist: bool,
}

impl SearchFlags {
    fn search_type(&self) -> Result<SearchType> {
        match (self.track, self.album, self.artist) {
            (true, false, false) => Ok(SearchType::Track),
            (false, true, false) => Ok(SearchType::Album),
            (false, false, true) => Ok(SearchType::Artist),
            // clap's ArgGroup enforces this already; kept as a guard for
            // programmatic callers.
            _ => Err(Error::Input(
                "exactly one of --track, --album, --artist is required".to_string(),
            )),
        }
    }
}

/// Search, select, download, and tag one track.
pub fn cmd_download(
    rt: &Runtime,
    flags: SearchFlags,
    query: &str,
    quality: Option<Quality>,
    output: Option<&Path>,
    auto: bool,
) -> Result<()> {
    let search_type = flags.search_type()?;
    if query.trim().is_empty() {
        return Err(Error::Input("query must not be empty".to_string()));
    }

    let config = config::load();
    let quality = quality
        .or(config.download.quality)
        .unwrap_or_default();
    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.download.output.clone())
        .unwrap_or_else(|| PathBuf::from("./downloads"));

    let request = PipelineRequest {
        search_type,
        query: query.to_string(),
        quality,
        output,
    };

    rt.block_on(async {
        let catalog = HifiClient::new(&config.catalog);
        let transfer = HttpTransfer::new();
        let prompt: Box<dyn SelectionPrompt> = if auto {
            Box::new(AutoPrompt)
        } else {
            Box::new(TerminalPrompt)
        };

        let report = Pipeline::new(&catalog, &transfer, prompt.as_ref())
            .run(&request)
            .await?;

        match &report.outcome {
            FetchOutcome::Downloaded(path) => {
                println!("Saved: {}", path.display());
            }
            FetchOutcome::AlreadyExists(path) => {
                println!("Already downloaded: {}", path.display());
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_flags_map_to_types() {
        let flags = SearchFlags {
            track: false,
            album: true,
            artist: false,
        };
        assert_eq!(flags.search_type().unwrap(), SearchType::Album);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        let flags = SearchFlags {
            track: true,
            album: true,
            artist: false,
        };
        assert!(matches!(flags.search_type(), Err(Error::Input(_))));
    }

    #[test]
    fn test_empty_query_rejected_before_any_network() {
        let rt = Runtime::new().unwrap();
        let flags = SearchFlags {
            track: true,
            album: false,
            artist: false,
        };
        let err = cmd_download(&rt, flags, "  ", None, None, true).unwrap_err();
        assert!(matches!(err, Error::Input(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
