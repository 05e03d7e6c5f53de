//! Filename derivation: "{artists} - {title}.flac", sanitized.
//!
//! Pure functions so filename policy is testable independent of the
//! filesystem.

/// Characters that are unsafe in filenames on at least one supported OS.
const HOSTILE: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Longest allowed stem, in characters, leaving headroom for the
/// extension under common 255-byte name limits.
const MAX_STEM_CHARS: usize = 180;

/// Derive the download filename for a record.
///
/// Joins the (already deduplicated) artist names, appends the title,
/// strips filesystem-hostile characters, trims trailing dots and spaces,
/// and bounds the length.
pub fn derive_filename(artists: &[String], title: &str) -> String {
    let stem = if artists.is_empty() {
        title.to_string()
    } else {
        format!("{} - {}", artists.join(", "), title)
    };
    let mut clean = sanitize(&stem);
    if clean.is_empty() {
        clean = "track".to_string();
    }
    format!("{clean}.flac")
}

/// Strip hostile and control characters, collapse the result, and bound
/// its length on a char boundary.
fn sanitize(stem: &str) -> String {
    let filtered: String = stem
        .chars()
        .filter(|c| !HOSTILE.contains(c) && !c.is_control())
        .collect();
    let trimmed = filtered.trim().trim_end_matches(['.', ' ']);
    trimmed.chars().take(MAX_STEM_CHARS).collect::<String>()
        .trim_end_matches(['.', ' '])
        .to_string()
}
