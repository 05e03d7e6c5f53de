//! Adapter layer: Convert hifi DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if the hifi endpoints change their response
//! shape, only this file and dto.rs need to change.

use std::time::Duration;

use super::dto;
use crate::catalog::domain::{AlbumRef, CatalogRecord};

/// Convert raw search items into catalog records.
///
/// Items that fail to parse are skipped with a debug log; the endpoints
/// carry no schema guarantees, and one malformed item must not sink the
/// whole result set.
pub fn to_records(items: Vec<serde_json::Value>) -> Vec<CatalogRecord> {
    items
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<dto::TrackItem>(value) {
            Ok(item) => Some(to_record(item)),
            Err(e) => {
                tracing::debug!("skipping malformed search item: {e}");
                None
            }
        })
        .collect()
}

/// Convert one track item into a catalog record.
pub fn to_record(item: dto::TrackItem) -> CatalogRecord {
    let artists = build_artist_list(&item.artists, item.artist.as_ref());
    let album_artist = item
        .artist
        .as_ref()
        .and_then(|a| a.name.clone())
        .filter(|n| !n.is_empty())
        .or_else(|| artists.first().cloned());

    let album = item.album.and_then(|a| {
        // An album without id and title is useless downstream.
        let id = a.id?;
        Some(AlbumRef {
            id,
            title: a.title.unwrap_or_default(),
            cover: a.cover.filter(|c| !c.is_empty()),
        })
    });

    let release_date = item.release_date.or(item.stream_start_date);

    CatalogRecord {
        id: item.id,
        title: item.title,
        version: item.version.filter(|v| !v.is_empty()),
        artists,
        album_artist,
        album,
        duration: item.duration.map(Duration::from_secs),
        explicit: item.explicit.unwrap_or(false),
        audio_quality: item.audio_quality,
        popularity: item.popularity,
        track_number: item.track_number,
        volume_number: item.volume_number,
        release_date,
        isrc: item.isrc,
        copyright: item.copyright,
        bpm: item.bpm,
    }
}

/// Collect named artists in credit order, deduplicated case-insensitively.
/// Falls back to the main artist when the credit list is empty.
fn build_artist_list(artists: &[dto::ArtistDto], main: Option<&dto::ArtistDto>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    let candidates = artists.iter().chain(main);
    for artist in candidates {
        let Some(name) = artist.name.as_deref() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let key = name.to_uppercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(name.to_string());
        }
    }
    out
}
