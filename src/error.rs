//! Application-wide error types.
//!
//! Library modules carry specific error types via `thiserror` and convert
//! into this top-level enum at the pipeline boundary. `main` maps each
//! variant to a stable process exit code:
//!
//! | code | condition |
//! |------|-----------|
//! | 0 | success |
//! | 2 | input error (also clap's own usage-error code) |
//! | 3 | catalog unavailable (network/parse) |
//! | 4 | no results |
//! | 5 | selection cancelled |
//! | 6 | requested quality unavailable |
//! | 7 | transfer failed |
//! | 8 | disk write failed |
//! | 9 | tagging failed (audio file kept) |

use std::path::PathBuf;

use crate::catalog::domain::{CatalogError, Quality};
use crate::downloader::FetchError;
use crate::metadata::TagError;
use crate::selector::SelectError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// One variant per user-visible failure kind; each maps to a distinct
/// exit code via [`Error::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or missing input (empty query, unusable output path)
    #[error("{0}")]
    Input(String),

    /// The external catalog is unreachable or returned garbage
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The search produced no candidate records
    #[error("no results matched the search")]
    NoResults,

    /// The user cancelled the interactive selection
    #[error("selection cancelled")]
    SelectionAborted,

    /// The catalog does not offer the requested quality for this record
    #[error("quality {0} is not available for this track")]
    QualityUnavailable(Quality),

    /// The download was interrupted or rejected
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Local filesystem error while writing the download
    #[error("disk write failed: {0}")]
    DiskWriteFailed(String),

    /// Tag writing failed; the downloaded audio is left in place untagged
    #[error("tagging failed for {path}: {message} (the audio file was kept)")]
    TaggingFailed { path: PathBuf, message: String },
}

impl Error {
    /// Stable exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Input(_) => 2,
            Error::CatalogUnavailable(_) => 3,
            Error::NoResults => 4,
            Error::SelectionAborted => 5,
            Error::QualityUnavailable(_) => 6,
            Error::TransferFailed(_) => 7,
            Error::DiskWriteFailed(_) => 8,
            Error::TaggingFailed { .. } => 9,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Network(msg) => Error::CatalogUnavailable(msg),
            CatalogError::Parse(msg) => Error::CatalogUnavailable(msg),
            CatalogError::QualityUnavailable { quality, .. } => Error::QualityUnavailable(quality),
        }
    }
}

impl From<SelectError> for Error {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::NoResults => Error::NoResults,
            SelectError::Aborted => Error::SelectionAborted,
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transfer(msg) => Error::TransferFailed(msg),
            FetchError::Disk(msg) => Error::DiskWriteFailed(msg),
        }
    }
}

impl From<TagError> for Error {
    fn from(err: TagError) -> Self {
        Error::TaggingFailed {
            path: err.path,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Input("bad".into()),
            Error::CatalogUnavailable("down".into()),
            Error::NoResults,
            Error::SelectionAborted,
            Error::QualityUnavailable(Quality::Lossless),
            Error::TransferFailed("reset".into()),
            Error::DiskWriteFailed("full".into()),
            Error::TaggingFailed {
                path: PathBuf::from("x.flac"),
                message: "bad header".into(),
            },
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: Error = CatalogError::Network("connection refused".into()).into();
        assert!(matches!(err, Error::CatalogUnavailable(_)));

        let err: Error = CatalogError::QualityUnavailable {
            quality: Quality::HiResLossless,
            track_id: 42,
        }
        .into();
        assert!(matches!(
            err,
            Error::QualityUnavailable(Quality::HiResLossless)
        ));
    }

    #[test]
    fn test_tagging_message_mentions_kept_file() {
        let err = Error::TaggingFailed {
            path: PathBuf::from("a.flac"),
            message: "unrecognized container".into(),
        };
        assert!(err.to_string().contains("kept"));
    }
}
