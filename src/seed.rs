//! Seed loader - bulk-loads quotes from a `"Character: quote text"` file
//!
//! Malformed lines (no separator, or either side empty after trimming) are
//! logged and skipped; they are the only failures this crate swallows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::quote::QuoteDraft;
use crate::storage::QuoteStore;
use crate::Result;

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedStats {
    pub added: usize,
    pub skipped: usize,
}

impl std::fmt::Display for SeedStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} quotes added, {} lines skipped", self.added, self.skipped)
    }
}

/// Split a seed line into (character, quote text).
///
/// The separator is the first `:`; both sides are trimmed. Returns `None`
/// for lines that cannot produce a valid quote.
pub fn parse_seed_line(line: &str) -> Option<(&str, &str)> {
    let (character, text) = line.split_once(':')?;
    let character = character.trim();
    let text = text.trim();
    if character.is_empty() || text.is_empty() {
        return None;
    }
    Some((character, text))
}

/// Load quotes from a reader, inserting one row per valid line.
///
/// Blank lines are ignored silently; malformed lines are counted and logged
/// with their line number. Storage failures abort the run.
pub fn load_quotes<R: BufRead>(store: &QuoteStore, reader: R) -> Result<SeedStats> {
    let mut stats = SeedStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;

        if line.trim().is_empty() {
            continue;
        }

        match parse_seed_line(&line).map(|(character, text)| QuoteDraft::new(text, character)) {
            Some(Ok(draft)) => {
                store.insert_quote(&draft)?;
                stats.added += 1;
            }
            Some(Err(e)) => {
                tracing::warn!(line = line_num, %e, "skipping invalid seed line");
                stats.skipped += 1;
            }
            None => {
                tracing::warn!(line = line_num, "skipping malformed seed line");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

/// Load quotes from a file path, optionally clearing the store first
pub fn load_quotes_from_path(store: &QuoteStore, path: &Path, clear: bool) -> Result<SeedStats> {
    if clear {
        let removed = store.delete_all_quotes()?;
        tracing::info!(removed, "cleared existing quotes");
    }

    let file = File::open(path)?;
    load_quotes(store, BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_seed_line() {
        assert_eq!(
            parse_seed_line("Bender: Bite my shiny metal ass!"),
            Some(("Bender", "Bite my shiny metal ass!"))
        );
        // only the first colon separates
        assert_eq!(
            parse_seed_line("Fry: It's just like the story: boy meets girl"),
            Some(("Fry", "It's just like the story: boy meets girl"))
        );
    }

    #[test]
    fn test_parse_seed_line_malformed() {
        assert_eq!(parse_seed_line("no separator here"), None);
        assert_eq!(parse_seed_line(": missing character"), None);
        assert_eq!(parse_seed_line("Bender:   "), None);
        assert_eq!(parse_seed_line("  :  "), None);
    }

    #[test]
    fn test_load_quotes_counts_added_and_skipped() {
        let store = QuoteStore::open_in_memory().unwrap();
        let input = "\
Professor: Good news, everyone!
garbage line without separator

Bender: Bite my shiny metal ass!
: headless quote
Fry: Shut up and take my money!
";
        let stats = load_quotes(&store, Cursor::new(input)).unwrap();

        assert_eq!(stats.added, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(store.count_quotes().unwrap(), 3);
    }

    #[test]
    fn test_load_quotes_skips_oversized_character() {
        let store = QuoteStore::open_in_memory().unwrap();
        let long_name = "x".repeat(crate::quote::MAX_CHARACTER_LEN + 1);
        let input = format!("{}: some quote\nFry: fine\n", long_name);

        let stats = load_quotes(&store, Cursor::new(input)).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_load_quotes_from_path_with_clear() {
        let store = QuoteStore::open_in_memory().unwrap();
        store
            .insert_quote(&QuoteDraft::new("stale", "Nibbler").unwrap())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        std::fs::write(&path, "Leela: That's not how it works!\n").unwrap();

        let stats = load_quotes_from_path(&store, &path, true).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(store.count_quotes().unwrap(), 1);
        assert_eq!(store.distinct_characters().unwrap(), vec!["Leela"]);
    }
}
