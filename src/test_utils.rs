//! Test utilities and fixtures for mora tests.
//!
//! Provides a catalog-record factory and a minimal FLAC fixture so
//! tagging tests can run against a real container without shipping
//! binary assets.

use std::path::Path;

use crate::catalog::domain::CatalogRecord;

/// Build a record with the given id, title, and artists; everything else
/// empty. Tests set the fields they care about.
pub fn make_record(id: u64, title: &str, artists: &[&str]) -> CatalogRecord {
    CatalogRecord {
        id,
        title: title.to_string(),
        version: None,
        artists: artists.iter().map(|s| s.to_string()).collect(),
        album_artist: None,
        album: None,
        duration: None,
        explicit: false,
        audio_quality: Some("LOSSLESS".to_string()),
        popularity: None,
        track_number: None,
        volume_number: None,
        release_date: None,
        isrc: None,
        copyright: None,
        bpm: None,
    }
}

/// Bytes of a structurally valid FLAC file with a STREAMINFO block and no
/// audio frames: enough for lofty to probe and write tags to.
pub fn minimal_flac_bytes() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"fLaC");

    // Metadata block header: last-block flag set, type 0 (STREAMINFO),
    // length 34.
    data.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);

    // STREAMINFO: block sizes 4096, frame sizes unknown.
    data.extend_from_slice(&0x1000u16.to_be_bytes()); // min block size
    data.extend_from_slice(&0x1000u16.to_be_bytes()); // max block size
    data.extend_from_slice(&[0x00, 0x00, 0x00]); // min frame size
    data.extend_from_slice(&[0x00, 0x00, 0x00]); // max frame size
    // 44100 Hz (20 bits), 2 channels (3 bits), 16 bits per sample
    // (5 bits), 0 total samples (36 bits), packed big-endian.
    data.extend_from_slice(&[0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0u8; 16]); // MD5 of the (empty) audio data

    data
}

/// The minimal fixture with a trailing PADDING block, for tests that tag
/// the file.
///
/// lofty 0.22.4's FLAC writer panics when STREAMINFO is the final metadata
/// block (it patches the last-block flag through a buffer that starts after
/// STREAMINFO), so files that get tagged need the layout real encoders
/// produce.
pub fn writable_flac_bytes() -> Vec<u8> {
    let mut data = minimal_flac_bytes();
    data[4] = 0x00; // STREAMINFO is no longer the last metadata block

    // Metadata block header: last-block flag set, type 1 (PADDING),
    // length 4, followed by the zeroed padding bytes.
    data.extend_from_slice(&[0x81, 0x00, 0x00, 0x04]);
    data.extend_from_slice(&[0u8; 4]);

    data
}

/// Write the minimal FLAC fixture to the given path.
pub fn write_minimal_flac(path: &Path) {
    std::fs::write(path, writable_flac_bytes()).expect("write test fixture");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_has_streaminfo_layout() {
        let bytes = minimal_flac_bytes();
        assert_eq!(&bytes[0..4], b"fLaC");
        assert_eq!(bytes[4], 0x80); // last metadata block
        assert_eq!(bytes.len(), 4 + 4 + 34);
    }
}
