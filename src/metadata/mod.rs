//! Tag embedding for downloaded audio files.
//!
//! Uses the lofty crate for format-independent metadata access. The
//! chosen record's fields are written into the file's primary tag:
//! title, artist(s), album, album artist, track number, year, ISRC, BPM,
//! copyright, and a front-cover picture when art is available.
//!
//! A tagging failure never deletes the audio - the file stays usable
//! untagged.

use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};

use crate::catalog::domain::CatalogRecord;

/// Tagging failure for one file.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TagError {
    /// The file that could not be tagged (left in place)
    pub path: PathBuf,
    pub message: String,
}

impl TagError {
    fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Write the record's metadata (and optional cover art) into the file.
pub fn embed(
    path: &Path,
    record: &CatalogRecord,
    cover: Option<Vec<u8>>,
) -> Result<(), TagError> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| TagError::new(path, format!("failed to open file: {e}")))?
        .read()
        .map_err(|e| TagError::new(path, format!("unrecognized container: {e}")))?;

    let tag_type = tagged_file.primary_tag_type();
    let tag = if let Some(tag) = tagged_file.tag_mut(tag_type) {
        tag
    } else {
        tagged_file.insert_tag(Tag::new(tag_type));
        tagged_file.tag_mut(tag_type).expect("Just inserted tag")
    };

    tag.set_title(record.display_title());
    if !record.artists.is_empty() {
        tag.set_artist(record.artists.join(", "));
    }
    if let Some(album) = &record.album {
        tag.set_album(album.title.clone());
    }
    if let Some(album_artist) = &record.album_artist {
        tag.insert_text(ItemKey::AlbumArtist, album_artist.clone());
    }
    if let Some(track_number) = record.track_number {
        tag.set_track(track_number);
    }
    if let Some(volume_number) = record.volume_number {
        tag.set_disk(volume_number);
    }
    if let Some(year) = record.year() {
        tag.set_year(year);
    }
    if let Some(isrc) = &record.isrc {
        tag.insert_text(ItemKey::Isrc, isrc.clone());
    }
    if let Some(copyright) = &record.copyright {
        tag.insert_text(ItemKey::CopyrightMessage, copyright.clone());
    }
    if let Some(bpm) = record.bpm {
        tag.insert_text(ItemKey::IntegerBpm, bpm.to_string());
    }

    if let Some(data) = cover {
        let picture = Picture::new_unchecked(
            PictureType::CoverFront,
            Some(sniff_mime(&data)),
            Some("Front Cover".to_string()),
            data,
        );
        tag.push_picture(picture);
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| TagError::new(path, format!("failed to write tags: {e}")))?;

    tracing::debug!(path = %path.display(), "tags written");
    Ok(())
}

/// Guess the image MIME type from magic bytes; the catalog serves JPEG
/// but the manifest makes no promises.
fn sniff_mime(data: &[u8]) -> MimeType {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        MimeType::Png
    } else {
        MimeType::Jpeg
    }
}
