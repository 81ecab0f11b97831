#![allow(dead_code)]
//! Dictionary for optional word validation
//!
//! The word list is expected to be pre-sorted ascending and lower-case, one
//! word per line; lookups are exact-match binary searches over the full list
//! held in memory.

use std::fs;
use std::io;
use std::path::Path;

/// An in-memory, sorted word list.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from a word list, one word per line.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.lines().map(str::to_string).collect(),
        }
    }

    /// Load the word list from a file.
    pub fn load(path: &Path) -> io::Result<Self> {
        Ok(Self::from_text(&fs::read_to_string(path)?))
    }

    /// Case-insensitive exact-match lookup.
    pub fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.words
            .binary_search_by(|w| w.as_str().cmp(lower.as_str()))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_text("and\ncat\ndog\nthe\nword\n")
    }

    #[test]
    fn finds_listed_words() {
        let dict = sample();
        assert!(dict.contains("cat"));
        assert!(dict.contains("the"));
        assert!(dict.contains("word"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dict = sample();
        assert!(dict.contains("CAT"));
        assert!(dict.contains("DoG"));
    }

    #[test]
    fn rejects_unlisted_words() {
        let dict = sample();
        assert!(!dict.contains("tac"));
        assert!(!dict.contains("xyzzy"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn boundary_words_are_found() {
        let dict = sample();
        assert!(dict.contains("and"));
        assert!(dict.contains("word"));
    }
}
