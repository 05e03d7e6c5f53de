//! Internal domain models for catalog search and asset resolution.
//!
//! These types are OUR types - they don't change when the external API
//! changes. All wire responses get converted into these via the adapter
//! in the `hifi` module; optional/missing-field handling stops there.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which dimension of the catalog a query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Match track titles
    Track,
    /// Match album titles
    Album,
    /// Match artist names exactly
    Artist,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchType::Track => write!(f, "track"),
            SearchType::Album => write!(f, "album"),
            SearchType::Artist => write!(f, "artist"),
        }
    }
}

/// Requested audio fidelity tier.
///
/// The catalog's quality labels are wider (LOW/HIGH/...), but only the
/// lossless tiers can be requested for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quality {
    /// 16-bit / 44.1 kHz FLAC
    #[default]
    #[value(name = "LOSSLESS")]
    Lossless,
    /// Up to 24-bit / 192 kHz FLAC
    #[value(name = "HI_RES_LOSSLESS")]
    HiResLossless,
}

impl Quality {
    /// Wire value expected by the catalog's track endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Lossless => "LOSSLESS",
            Quality::HiResLossless => "HI_RES_LOSSLESS",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Album a track belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    /// Opaque album id within the external catalog
    pub id: u64,
    /// Album title
    pub title: String,
    /// Cover id (32 hex digits, possibly dash-separated on the wire)
    pub cover: Option<String>,
}

/// One candidate match returned by a catalog search.
///
/// Every search type yields playable track records; the search type only
/// selects which dimension the query was matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Opaque track id within the external catalog
    pub id: u64,
    /// Track title
    pub title: String,
    /// Version suffix (e.g. "Remastered 2011"), folded into the display title
    pub version: Option<String>,
    /// Credited artists, in catalog order, deduplicated
    pub artists: Vec<String>,
    /// Main artist, used for the ALBUMARTIST tag
    pub album_artist: Option<String>,
    /// Album this track appears on
    pub album: Option<AlbumRef>,
    /// Track duration
    pub duration: Option<Duration>,
    /// Whether the track is flagged explicit
    pub explicit: bool,
    /// Quality label the catalog advertises for this record (LOW/HIGH/LOSSLESS/...)
    pub audio_quality: Option<String>,
    /// Catalog popularity score
    pub popularity: Option<u32>,
    /// Position on the album
    pub track_number: Option<u32>,
    /// Disc/volume number
    pub volume_number: Option<u32>,
    /// Release date (YYYY-MM-DD)
    pub release_date: Option<String>,
    /// International Standard Recording Code
    pub isrc: Option<String>,
    /// Copyright line
    pub copyright: Option<String>,
    /// Beats per minute
    pub bpm: Option<u32>,
}

impl CatalogRecord {
    /// Title with the version suffix appended, unless the title already
    /// contains it.
    pub fn display_title(&self) -> String {
        match &self.version {
            Some(v) if !v.is_empty() && !self.title.to_lowercase().contains(&v.to_lowercase()) => {
                format!("{} ({})", self.title, v)
            }
            _ => self.title.clone(),
        }
    }

    /// Cover id to fetch art for, if the record carries one.
    pub fn cover_id(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.cover.as_deref())
    }

    /// Release year parsed from the release date.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }
}

/// A resolved, downloadable resource for one record at one quality.
///
/// Short-lived: the URLs may expire, so a reference is only good for the
/// download attempt it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Segment URLs to stream, in order. A single element for direct
    /// assets; an initialization segment followed by media segments for
    /// segmented assets.
    pub urls: Vec<String>,
    /// Codec hint from the manifest, when present
    pub codec: Option<String>,
    /// Bit depth, when the catalog reports it
    pub bit_depth: Option<u8>,
    /// Sample rate in Hz, when the catalog reports it
    pub sample_rate: Option<u32>,
    /// Quality this reference was resolved at
    pub quality: Quality,
}

/// Errors from talking to the catalog.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse catalog response: {0}")]
    Parse(String),

    #[error("quality {quality} is not offered for track {track_id}")]
    QualityUnavailable { quality: Quality, track_id: u64 },
}
