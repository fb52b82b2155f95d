//! Dictionary validation for guesses

use super::ALLOWED;
use super::loader::{load_from_file, words_from_slice};
use crate::core::Word;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;

/// Decides whether a normalized guess is a recognized word
pub trait WordValidator: Send + Sync {
    fn is_valid_word(&self, word: &Word) -> bool;
}

/// Validator backed by an in-memory word set
#[derive(Debug, Clone)]
pub struct WordListValidator {
    words: Vec<String>,
    word_set: FxHashSet<String>,
}

impl WordListValidator {
    /// Build from already-normalized words, dropping duplicates but keeping order
    #[must_use]
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut list = Vec::new();
        let mut word_set = FxHashSet::default();
        for word in words {
            if word_set.insert(word.text().to_string()) {
                list.push(word.text().to_string());
            }
        }
        Self {
            words: list,
            word_set,
        }
    }

    /// The dictionary compiled into the binary
    #[must_use]
    pub fn embedded(length: usize) -> Self {
        Self::from_words(words_from_slice(ALLOWED, length))
    }

    /// Load a dictionary file (one word per line)
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P, length: usize) -> io::Result<Self> {
        Ok(Self::from_words(load_from_file(path, length)?))
    }

    /// All words, uppercase, in load order
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for WordListValidator {
    fn is_valid_word(&self, word: &Word) -> bool {
        self.word_set.contains(word.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dictionary_accepts_known_words() {
        let validator = WordListValidator::embedded(5);
        assert!(!validator.is_empty());
        assert!(validator.is_valid_word(&Word::new("apple").unwrap()));
        assert!(validator.is_valid_word(&Word::new("SLATE").unwrap()));
        assert!(!validator.is_valid_word(&Word::new("xqzzv").unwrap()));
    }

    #[test]
    fn from_words_deduplicates() {
        let words = words_from_slice(&["crane", "CRANE", "slate"], 5);
        let validator = WordListValidator::from_words(words);
        assert_eq!(validator.len(), 2);
        assert_eq!(validator.words(), &["CRANE".to_string(), "SLATE".to_string()]);
    }

    #[test]
    fn embedded_dictionary_filters_by_length() {
        let validator = WordListValidator::embedded(6);
        assert!(validator.is_empty());
    }
}
