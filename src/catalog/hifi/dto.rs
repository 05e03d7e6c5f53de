//! hifi API Data Transfer Objects
//!
//! These types match EXACTLY what the hifi endpoints return.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the hifi module - convert to domain types.
//!
//! The endpoints are reverse engineered and carry no schema versioning, so
//! every field beyond the identifiers is optional. Search items are kept as
//! raw JSON values here and parsed one at a time in the adapter, so a single
//! malformed item degrades to a skipped record instead of failing the whole
//! response.

use serde::{Deserialize, Serialize};

/// `/search/?s=` response envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: SearchData,
}

/// Payload of a search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchData {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// One track item within a search response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackItem {
    /// Track id
    pub id: u64,
    /// Track title
    pub title: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub popularity: Option<u32>,
    /// Main artist
    #[serde(default)]
    pub artist: Option<ArtistDto>,
    /// All credited artists
    #[serde(default)]
    pub artists: Vec<ArtistDto>,
    #[serde(default)]
    pub album: Option<AlbumDto>,
    #[serde(default)]
    pub explicit: Option<bool>,
    /// Quality label (LOW/HIGH/LOSSLESS/HI_RES_LOSSLESS)
    #[serde(default)]
    pub audio_quality: Option<String>,
    /// Version suffix (e.g. "Remastered")
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub isrc: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub bpm: Option<u32>,
    /// Release date (YYYY-MM-DD)
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    /// Disc number
    #[serde(default)]
    pub volume_number: Option<u32>,
    /// Fallback date when releaseDate is absent
    #[serde(default)]
    pub stream_start_date: Option<String>,
}

/// Artist reference within a track item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Album reference within a track item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Cover id (32 hex digits, dash-separated)
    #[serde(default)]
    pub cover: Option<String>,
}

/// `/track/?id=&quality=` response envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ManifestResponse {
    #[serde(default)]
    pub data: Option<ManifestData>,
}

/// Payload of a track manifest response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestData {
    /// Base64 manifest body
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub manifest_mime_type: Option<String>,
    /// Quality the manifest was actually issued at
    #[serde(default)]
    pub audio_quality: Option<String>,
    #[serde(default)]
    pub bit_depth: Option<u8>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_minimal_track_item() {
        let json = r#"{"id": 12345, "title": "Monaco"}"#;

        let item: TrackItem = serde_json::from_str(json).expect("Should parse minimal item");

        assert_eq!(item.id, 12345);
        assert_eq!(item.title, "Monaco");
        assert!(item.artists.is_empty());
        assert!(item.album.is_none());
        assert!(item.audio_quality.is_none());
    }

    #[test]
    fn test_parse_full_track_item() {
        let json = r#"{
            "id": 320584452,
            "title": "MONACO",
            "duration": 267,
            "popularity": 74,
            "artist": {"id": 10665, "name": "Bad Bunny"},
            "artists": [{"id": 10665, "name": "Bad Bunny"}],
            "album": {"id": 320584444, "title": "nadie sabe lo que va a pasar mañana", "cover": "e58026b2-84cb-4aae-a0c1-2d362bd0e6b2"},
            "explicit": true,
            "audioQuality": "LOSSLESS",
            "version": null,
            "isrc": "QM6MZ2381283",
            "copyright": "2023 Rimas Entertainment",
            "bpm": 139,
            "releaseDate": "2023-10-13",
            "trackNumber": 4,
            "volumeNumber": 1,
            "streamStartDate": "2023-10-13T00:00:00.000+0000"
        }"#;

        let item: TrackItem = serde_json::from_str(json).expect("Should parse full item");

        assert_eq!(item.id, 320584452);
        assert_eq!(item.duration, Some(267));
        assert_eq!(item.explicit, Some(true));
        assert_eq!(item.audio_quality.as_deref(), Some("LOSSLESS"));
        assert_eq!(item.release_date.as_deref(), Some("2023-10-13"));
        assert_eq!(item.track_number, Some(4));
        assert_eq!(
            item.album.as_ref().and_then(|a| a.cover.as_deref()),
            Some("e58026b2-84cb-4aae-a0c1-2d362bd0e6b2")
        );
        assert_eq!(
            item.artists[0].name.as_deref(),
            Some("Bad Bunny")
        );
    }

    #[test]
    fn test_parse_search_envelope() {
        let json = r#"{"data": {"items": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]}}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse envelope");

        assert_eq!(response.data.items.len(), 2);
    }

    #[test]
    fn test_parse_empty_search_envelope() {
        let response: SearchResponse = serde_json::from_str("{}").expect("Should parse empty body");
        assert!(response.data.items.is_empty());
    }

    #[test]
    fn test_parse_manifest_response() {
        let json = r#"{
            "data": {
                "manifest": "eyJ1cmxzIjogWyJodHRwczovL2Nkbi9hLmZsYWMiXX0=",
                "manifestMimeType": "application/vnd.tidal.bts",
                "audioQuality": "LOSSLESS",
                "bitDepth": 16,
                "sampleRate": 44100
            }
        }"#;

        let response: ManifestResponse =
            serde_json::from_str(json).expect("Should parse manifest response");

        let data = response.data.expect("data present");
        assert!(data.manifest.is_some());
        assert_eq!(
            data.manifest_mime_type.as_deref(),
            Some("application/vnd.tidal.bts")
        );
        assert_eq!(data.bit_depth, Some(16));
        assert_eq!(data.sample_rate, Some(44100));
    }

    #[test]
    fn test_parse_manifest_response_without_manifest() {
        let json = r#"{"data": {"audioQuality": "HIGH"}}"#;

        let response: ManifestResponse =
            serde_json::from_str(json).expect("Should parse manifest-less response");

        assert!(response.data.unwrap().manifest.is_none());
    }
}
