//! Pipeline orchestration: search, select, resolve, fetch, tag.
//!
//! One invocation runs the stages strictly in order; a stage must
//! complete before the next begins and no stage is retried. Any failure
//! carries its originating error kind to the caller unchanged. The single
//! downgrade case is tagging: a tag failure reports an error but leaves
//! the fetched audio in place.
//!
//! The orchestrator is generic over the catalog, transfer, and prompt
//! seams so tests drive it with stubs and no terminal or network I/O.

use std::path::PathBuf;

use crate::catalog::domain::{CatalogRecord, Quality, SearchType};
use crate::catalog::traits::CatalogApi;
use crate::downloader::{AssetTransfer, DownloadTarget, FetchOutcome};
use crate::error::{Error, Result};
use crate::metadata;
use crate::selector::{self, SelectionPrompt};

/// User-supplied configuration for one invocation. Immutable for the
/// invocation's lifetime.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub search_type: SearchType,
    pub query: String,
    pub quality: Quality,
    pub output: PathBuf,
}

/// What one successful invocation produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The record the file was downloaded for
    pub record: CatalogRecord,
    /// Where the audio ended up, and whether it was freshly downloaded
    pub outcome: FetchOutcome,
}

/// The wired-up pipeline for one invocation.
pub struct Pipeline<'a> {
    catalog: &'a dyn CatalogApi,
    transfer: &'a dyn AssetTransfer,
    prompt: &'a dyn SelectionPrompt,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        catalog: &'a dyn CatalogApi,
        transfer: &'a dyn AssetTransfer,
        prompt: &'a dyn SelectionPrompt,
    ) -> Self {
        Self {
            catalog,
            transfer,
            prompt,
        }
    }

    /// Run the full pipeline for one request.
    pub async fn run(&self, request: &PipelineRequest) -> Result<PipelineReport> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(Error::Input("query must not be empty".to_string()));
        }

        tracing::info!(
            search_type = %request.search_type,
            query,
            quality = %request.quality,
            "searching catalog"
        );
        let records = self.catalog.search(request.search_type, query).await?;
        tracing::info!(candidates = records.len(), "search complete");

        let record = selector::select(&records, self.prompt)?.clone();
        tracing::info!(track_id = record.id, title = %record.display_title(), "selected");

        let asset = self.catalog.resolve(&record, request.quality).await?;
        tracing::debug!(
            segments = asset.urls.len(),
            bit_depth = ?asset.bit_depth,
            sample_rate = ?asset.sample_rate,
            "asset resolved"
        );

        let target = DownloadTarget::for_record(&request.output, &record);
        let outcome = self.transfer.fetch(&asset, &target).await?;

        // A pre-existing completed file is assumed to be tagged already.
        if let FetchOutcome::Downloaded(path) = &outcome {
            let cover = match record.cover_id() {
                Some(cover_id) => match self.catalog.cover_art(cover_id).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        tracing::warn!("cover art unavailable, tagging without art: {e}");
                        None
                    }
                },
                None => None,
            };
            metadata::embed(path, &record, cover)?;
        }

        Ok(PipelineReport { record, outcome })
    }
}
