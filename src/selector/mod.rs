//! Result selection: pick one record out of a candidate set.
//!
//! Selection is split behind the [`SelectionPrompt`] capability so the
//! automatic first-match policy and the interactive terminal prompt are
//! swappable implementations of one interface, and the pipeline can be
//! tested without terminal I/O.

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::catalog::domain::CatalogRecord;

/// Errors from the selection stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("no results to select from")]
    NoResults,

    #[error("selection cancelled")]
    Aborted,
}

/// Capability interface for choosing among candidates.
///
/// `present` returns the chosen index, or `None` when the user cancels.
/// Implementations are only called with a non-empty slice.
pub trait SelectionPrompt {
    fn present(&self, records: &[CatalogRecord]) -> Option<usize>;
}

/// Pick one record from the candidate set via the given prompt.
///
/// The catalog's order is its relevance ranking, so index 0 is the best
/// match. An empty set fails with `NoResults` without prompting.
pub fn select<'a>(
    records: &'a [CatalogRecord],
    prompt: &dyn SelectionPrompt,
) -> Result<&'a CatalogRecord, SelectError> {
    if records.is_empty() {
        return Err(SelectError::NoResults);
    }
    match prompt.present(records) {
        Some(index) if index < records.len() => Ok(&records[index]),
        Some(_) => Err(SelectError::Aborted),
        None => Err(SelectError::Aborted),
    }
}

/// Deterministic prompt: always takes the first (most relevant) record.
pub struct AutoPrompt;

impl SelectionPrompt for AutoPrompt {
    fn present(&self, _records: &[CatalogRecord]) -> Option<usize> {
        Some(0)
    }
}

/// Interactive prompt: prints an indexed table and reads one choice from
/// stdin. Empty input, `q`, or EOF cancels; anything unparsable re-asks.
pub struct TerminalPrompt;

impl SelectionPrompt for TerminalPrompt {
    fn present(&self, records: &[CatalogRecord]) -> Option<usize> {
        print_candidates(records);

        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("Number to download (1-{}, q to cancel): ", records.len());
            let _ = std::io::stdout().flush();

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            let input = line.trim();
            if input.is_empty() || input.eq_ignore_ascii_case("q") {
                return None;
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=records.len()).contains(&n) => return Some(n - 1),
                _ => eprintln!("Invalid number"),
            }
        }
    }
}

/// Print the candidate table: index, title, artists, album, quality,
/// duration.
fn print_candidates(records: &[CatalogRecord]) {
    println!();
    println!(
        "{:>4}  {:<40} {:<28} {:<25} {:<16} {:>8}",
        "#", "Title", "Artist(s)", "Album", "Quality", "Duration"
    );
    for (i, record) in records.iter().enumerate() {
        let album = record
            .album
            .as_ref()
            .map(|a| a.title.as_str())
            .unwrap_or("Unknown");
        println!(
            "{:>4}  {:<40} {:<28} {:<25} {:<16} {:>8}",
            i + 1,
            truncate(&record.display_title(), 40),
            truncate(&format_artists(&record.artists), 28),
            truncate(album, 25),
            record.audio_quality.as_deref().unwrap_or("N/A"),
            record
                .duration
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!();
}

/// Join artist names, deduplicated, capped at three with an ellipsis.
pub fn format_artists(artists: &[String]) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut names: Vec<&str> = Vec::new();
    for name in artists {
        if name.is_empty() {
            continue;
        }
        let key = name.to_uppercase();
        if !seen.contains(&key) {
            seen.push(key);
            names.push(name);
        }
    }
    let mut out = names[..names.len().min(3)].join(", ");
    if names.len() > 3 {
        out.push_str("...");
    }
    out
}

/// Render a duration as m:ss.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_record;

    struct FixedPrompt(Option<usize>);

    impl SelectionPrompt for FixedPrompt {
        fn present(&self, _records: &[CatalogRecord]) -> Option<usize> {
            self.0
        }
    }

    #[test]
    fn test_auto_takes_first_record() {
        let records = vec![
            make_record(1, "First", &["A"]),
            make_record(2, "Second", &["B"]),
        ];
        let chosen = select(&records, &AutoPrompt).unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn test_empty_set_skips_prompting() {
        struct PanickyPrompt;
        impl SelectionPrompt for PanickyPrompt {
            fn present(&self, _records: &[CatalogRecord]) -> Option<usize> {
                panic!("must not be called for an empty set");
            }
        }
        let err = select(&[], &PanickyPrompt).unwrap_err();
        assert_eq!(err, SelectError::NoResults);
    }

    #[test]
    fn test_cancel_aborts() {
        let records = vec![make_record(1, "Only", &["A"])];
        let err = select(&records, &FixedPrompt(None)).unwrap_err();
        assert_eq!(err, SelectError::Aborted);
    }

    #[test]
    fn test_out_of_range_index_aborts() {
        let records = vec![make_record(1, "Only", &["A"])];
        let err = select(&records, &FixedPrompt(Some(5))).unwrap_err();
        assert_eq!(err, SelectError::Aborted);
    }

    #[test]
    fn test_format_artists_dedupes_and_caps() {
        let artists: Vec<String> = ["A", "a", "B", "C", "D"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(format_artists(&artists), "A, B, C...");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(267)), "4:27");
        assert_eq!(format_duration(Duration::from_secs(59)), "0:59");
    }
}
