//! Search post-processing: filtering, duplicate collapse, ordering.
//!
//! The catalog's search endpoint returns fuzzy matches in relevance order.
//! These pure functions narrow that set per search type before the
//! selector ever sees it, so the rest of the pipeline works with a clean,
//! deterministic candidate list.

use std::collections::HashMap;

use super::domain::{CatalogRecord, SearchType};

/// Rank of the catalog's quality labels, higher is better.
fn quality_rank(label: Option<&str>) -> u8 {
    match label {
        Some("LOW") => 1,
        Some("HIGH") => 2,
        Some("LOSSLESS") => 3,
        Some("HI_RES_LOSSLESS") => 4,
        _ => 0,
    }
}

/// Normalize a string for duplicate detection: lowercase, drop bracketed
/// segments, fold common diacritics, keep only ASCII alphanumerics.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut paren_depth = 0u32;
    let mut bracket_depth = 0u32;
    for c in s.trim().chars() {
        match c {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            _ if paren_depth > 0 || bracket_depth > 0 => {}
            _ if c.is_ascii() => {
                let lower = c.to_ascii_lowercase();
                if lower.is_ascii_alphanumeric() {
                    out.push(lower);
                }
            }
            _ => out.push_str(fold_diacritic(c)),
        }
    }
    out
}

/// Map accented Latin characters onto their ASCII base letters.
/// Unmapped non-ASCII characters are dropped.
fn fold_diacritic(c: char) -> &'static str {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "a",
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => "o",
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => "u",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ý' | 'ÿ' | 'Ý' => "y",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ß' => "ss",
        _ => "",
    }
}

/// Collapse duplicate records, keeping the highest-quality variant.
///
/// Records are considered duplicates when their normalized title, album
/// title, and explicit flag all match. First-seen order is preserved.
pub fn dedupe_keep_best(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let mut out: Vec<CatalogRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<(String, String, bool), usize> = HashMap::new();

    for record in records {
        let key = (
            normalize(&record.title),
            normalize(record.album.as_ref().map(|a| a.title.as_str()).unwrap_or("")),
            record.explicit,
        );
        match seen.get(&key) {
            Some(&idx) => {
                let held = quality_rank(out[idx].audio_quality.as_deref());
                let new = quality_rank(record.audio_quality.as_deref());
                if new > held {
                    out[idx] = record;
                }
            }
            None => {
                seen.insert(key, out.len());
                out.push(record);
            }
        }
    }
    out
}

/// Apply the per-search-type post-processing to a raw result set.
pub fn apply(search_type: SearchType, query: &str, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    match search_type {
        SearchType::Track => by_track_title(query, records),
        SearchType::Album => by_album_title(query, records),
        SearchType::Artist => by_artist_name(query, records),
    }
}

/// TRACK: keep records whose title contains the query, collapse duplicates.
fn by_track_title(query: &str, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let q = query.to_lowercase();
    let q = q.trim();
    let matched = records
        .into_iter()
        .filter(|r| r.title.to_lowercase().contains(q))
        .collect();
    dedupe_keep_best(matched)
}

/// ALBUM: keep records whose album title contains the query, ordered by
/// album, then disc, then track number.
fn by_album_title(query: &str, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let q = query.to_lowercase();
    let q = q.trim();
    let mut matched: Vec<CatalogRecord> = records
        .into_iter()
        .filter(|r| {
            r.album
                .as_ref()
                .is_some_and(|a| a.title.to_lowercase().contains(q))
        })
        .collect();
    matched.sort_by(|a, b| {
        let album_a = a.album.as_ref().map(|x| x.title.as_str()).unwrap_or("");
        let album_b = b.album.as_ref().map(|x| x.title.as_str()).unwrap_or("");
        album_a
            .cmp(album_b)
            .then(a.volume_number.unwrap_or(0).cmp(&b.volume_number.unwrap_or(0)))
            .then(a.track_number.unwrap_or(0).cmp(&b.track_number.unwrap_or(0)))
    });
    matched
}

/// ARTIST: keep records with an exact artist-name match, collapse
/// duplicates, order albums by their best popularity.
fn by_artist_name(query: &str, records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let q = query.to_lowercase();
    let q = q.trim();
    let matched: Vec<CatalogRecord> = records
        .into_iter()
        .filter(|r| r.artists.iter().any(|a| a.to_lowercase().trim() == q))
        .collect();
    let mut deduped = dedupe_keep_best(matched);

    // Best popularity seen per album, so whole albums sort together.
    let mut album_pops: HashMap<String, u32> = HashMap::new();
    for record in &deduped {
        let key = normalize(record.album.as_ref().map(|a| a.title.as_str()).unwrap_or(""));
        let pop = record.popularity.unwrap_or(0);
        let entry = album_pops.entry(key).or_insert(0);
        if pop > *entry {
            *entry = pop;
        }
    }

    deduped.sort_by(|a, b| {
        let key_a = normalize(a.album.as_ref().map(|x| x.title.as_str()).unwrap_or(""));
        let key_b = normalize(b.album.as_ref().map(|x| x.title.as_str()).unwrap_or(""));
        let pop_a = album_pops.get(&key_a).copied().unwrap_or(0);
        let pop_b = album_pops.get(&key_b).copied().unwrap_or(0);
        pop_b
            .cmp(&pop_a)
            .then(key_a.cmp(&key_b))
            .then(a.track_number.unwrap_or(0).cmp(&b.track_number.unwrap_or(0)))
    });
    deduped
}
