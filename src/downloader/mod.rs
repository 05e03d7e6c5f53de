//! Asset fetching: stream a resolved asset into the output folder.
//!
//! Bytes land in a `.part` staging file and are renamed to the final name
//! only once every segment has been written, so an interrupted run never
//! leaves a final-named partial. A completed file with the same derived
//! name is skipped and reported, never overwritten.

pub mod filename;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::catalog::domain::{AssetReference, CatalogRecord};

/// Errors from the fetch stage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Network interruption or a non-success response from the CDN
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// Local filesystem error (permissions, no space)
    #[error("disk write failed: {0}")]
    Disk(String),
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The asset was streamed to this path
    Downloaded(PathBuf),
    /// A completed file with the derived name already existed; nothing
    /// was written
    AlreadyExists(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Downloaded(p) | FetchOutcome::AlreadyExists(p) => p,
        }
    }
}

/// Local destination for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Output folder; created if absent
    pub folder: PathBuf,
    /// Derived, sanitized filename
    pub filename: String,
}

impl DownloadTarget {
    /// Build the target for a record under the given folder.
    pub fn for_record(folder: impl Into<PathBuf>, record: &CatalogRecord) -> Self {
        Self {
            folder: folder.into(),
            filename: filename::derive_filename(&record.artists, &record.display_title()),
        }
    }

    /// Final path of the completed download.
    pub fn final_path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }

    /// Staging path holding in-progress data.
    pub fn part_path(&self) -> PathBuf {
        self.folder.join(format!("{}.part", self.filename))
    }
}

/// Trait for the transfer boundary, so the pipeline can run against a
/// stub without network access.
#[async_trait]
pub trait AssetTransfer: Send + Sync {
    /// Stream the asset to the target. Exactly one file is written per
    /// successful call.
    async fn fetch(
        &self,
        asset: &AssetReference,
        target: &DownloadTarget,
    ) -> Result<FetchOutcome, FetchError>;
}

const USER_AGENT: &str = concat!("mora/", env!("CARGO_PKG_VERSION"));

/// Streaming HTTP transfer with constant memory per download.
pub struct HttpTransfer {
    http_client: reqwest::Client,
}

impl HttpTransfer {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self { http_client }
    }

    /// Stream one segment URL into the open staging file.
    async fn stream_segment(
        &self,
        url: &str,
        index: usize,
        total_segments: usize,
        file: &mut tokio::fs::File,
    ) -> Result<(), FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transfer(format!(
                "HTTP {} for segment {}/{}",
                status,
                index + 1,
                total_segments
            )));
        }

        let content_length = response.content_length();
        let mut written: u64 = 0;
        let mut last_logged_pct: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Transfer(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::Disk(e.to_string()))?;
            written += chunk.len() as u64;

            if let Some(total) = content_length.filter(|t| *t > 0) {
                let pct = written * 100 / total;
                if pct >= last_logged_pct + 10 {
                    last_logged_pct = pct - pct % 10;
                    tracing::info!(segment = index + 1, "downloaded {last_logged_pct}%");
                }
            }
        }
        Ok(())
    }
}

impl Default for HttpTransfer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetTransfer for HttpTransfer {
    async fn fetch(
        &self,
        asset: &AssetReference,
        target: &DownloadTarget,
    ) -> Result<FetchOutcome, FetchError> {
        tokio::fs::create_dir_all(&target.folder)
            .await
            .map_err(|e| FetchError::Disk(e.to_string()))?;

        let final_path = target.final_path();
        if let Ok(meta) = tokio::fs::metadata(&final_path).await
            && meta.len() > 0
        {
            tracing::info!(path = %final_path.display(), "already downloaded, skipping");
            return Ok(FetchOutcome::AlreadyExists(final_path));
        }

        // Stale .part data from an interrupted run is truncated here.
        let part_path = target.part_path();
        let mut file = tokio::fs::File::create(&part_path)
            .await
            .map_err(|e| FetchError::Disk(e.to_string()))?;

        let total_segments = asset.urls.len();
        for (index, url) in asset.urls.iter().enumerate() {
            self.stream_segment(url, index, total_segments, &mut file)
                .await?;
        }

        file.flush()
            .await
            .map_err(|e| FetchError::Disk(e.to_string()))?;
        drop(file);

        tokio::fs::rename(&part_path, &final_path)
            .await
            .map_err(|e| FetchError::Disk(e.to_string()))?;

        tracing::info!(path = %final_path.display(), "download complete");
        Ok(FetchOutcome::Downloaded(final_path))
    }
}

#[cfg(test)]
pub mod mocks {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Mock transfer that writes provided bytes instead of touching the
    /// network, honoring the same skip-if-complete policy.
    pub struct MockTransfer {
        /// File content to materialize on fetch
        pub content: Vec<u8>,
        /// Number of fetch calls made
        pub fetch_calls: AtomicUsize,
    }

    impl MockTransfer {
        pub fn with_content(content: Vec<u8>) -> Self {
            Self {
                content,
                fetch_calls: AtomicUsize::new(0),
            }
        }

        pub fn fetch_count(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssetTransfer for MockTransfer {
        async fn fetch(
            &self,
            _asset: &AssetReference,
            target: &DownloadTarget,
        ) -> Result<FetchOutcome, FetchError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            tokio::fs::create_dir_all(&target.folder)
                .await
                .map_err(|e| FetchError::Disk(e.to_string()))?;
            let final_path = target.final_path();
            if let Ok(meta) = tokio::fs::metadata(&final_path).await
                && meta.len() > 0
            {
                return Ok(FetchOutcome::AlreadyExists(final_path));
            }
            tokio::fs::write(&final_path, &self.content)
                .await
                .map_err(|e| FetchError::Disk(e.to_string()))?;
            Ok(FetchOutcome::Downloaded(final_path))
        }
    }
}
