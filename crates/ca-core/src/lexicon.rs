//! Word-list loading for constraint sampling.
//!
//! Reads a system word list (one word per line), keeping only alphabetic
//! tokens, lower-cased, up to a configured limit. A missing list degrades
//! to a fixed fallback vocabulary so experiments stay runnable anywhere.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

/// Fallback vocabulary used when the word list is absent.
pub const FALLBACK_WORDS: [&str; 10] = [
    "apple",
    "river",
    "mountain",
    "journey",
    "discovery",
    "whisper",
    "shadow",
    "sunlight",
    "memory",
    "horizon",
];

/// Load up to `limit` candidate words for rule sampling.
///
/// Lines that are not purely alphabetic are skipped. If the file cannot
/// be opened the fallback vocabulary is cycled to `limit` words and a
/// warning is logged; absence of the list is not an error.
pub fn load_lexicon(path: &Path, limit: usize) -> Vec<String> {
    debug_assert!(limit > 0, "Lexicon limit must be positive");

    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            warn!(path = %path.display(), "lexicon not found, using default words");
            return fallback_lexicon(limit);
        }
    };

    let mut words = Vec::with_capacity(limit);
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else { break };
        let word = line.trim().to_lowercase();
        if !word.is_empty() && word.chars().all(|c| c.is_alphabetic()) {
            words.push(word);
        }
        if words.len() >= limit {
            break;
        }
    }

    info!(count = words.len(), path = %path.display(), "loaded lexicon");
    words
}

/// Cycle the fallback vocabulary up to `limit` entries.
fn fallback_lexicon(limit: usize) -> Vec<String> {
    FALLBACK_WORDS
        .iter()
        .cycle()
        .take(limit)
        .map(|w| (*w).to_string())
        .collect()
}
