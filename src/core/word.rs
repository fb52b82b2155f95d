//! Normalized word representation
//!
//! A Word stores an uppercase guess or solution along with letter position indices
//! used for feedback calculation and hard-mode checks.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// A normalized, letters-only word
///
/// Input is trimmed and uppercased on construction. Letters are stored as `char`s
/// so positions line up with what the player typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    chars: Vec<char>,
    char_positions: FxHashMap<char, Vec<usize>>,
}

/// Error type for malformed words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("guess cannot be empty")]
    Empty,
    #[error("guess must be {expected} letters long")]
    InvalidLength { expected: usize, actual: usize },
    #[error("guess must contain only letters")]
    NonLetters,
}

impl Word {
    /// Create a new Word of any length from a string
    ///
    /// # Errors
    /// Returns `WordError` if the trimmed input is empty or contains anything
    /// other than letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_tracker::core::Word;
    ///
    /// let word = Word::new(" crane ").unwrap();
    /// assert_eq!(word.text(), "CRANE");
    ///
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return Err(WordError::Empty);
        }

        if !cleaned.chars().all(char::is_alphabetic) {
            return Err(WordError::NonLetters);
        }

        let text: String = cleaned.to_uppercase();
        let chars: Vec<char> = text.chars().collect();

        // Build position map for fast lookup
        let mut char_positions: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (i, &ch) in chars.iter().enumerate() {
            char_positions.entry(ch).or_default().push(i);
        }

        Ok(Self {
            text,
            chars,
            char_positions,
        })
    }

    /// Create a Word that must have exactly `length` letters
    ///
    /// # Errors
    /// Returns `WordError` if the input is empty, has the wrong number of
    /// letters, or contains non-letters. Length is checked before content.
    ///
    /// # Examples
    /// ```
    /// use wordle_tracker::core::{Word, WordError};
    ///
    /// assert!(Word::with_length("apple", 5).is_ok());
    /// assert_eq!(
    ///     Word::with_length("apples", 5),
    ///     Err(WordError::InvalidLength { expected: 5, actual: 6 })
    /// );
    /// ```
    pub fn with_length(text: &str, length: usize) -> Result<Self, WordError> {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return Err(WordError::Empty);
        }

        // Uppercasing can add letters (ß -> SS), so count the normalized form
        let actual = cleaned.to_uppercase().chars().count();
        if actual != length {
            return Err(WordError::InvalidLength {
                expected: length,
                actual,
            });
        }

        Self::new(cleaned)
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the letters of the word
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for a constructed word; present for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get all positions where a letter appears
    ///
    /// Returns an empty slice if the letter doesn't appear.
    #[inline]
    pub fn positions_of(&self, letter: char) -> &[usize] {
        self.char_positions
            .get(&letter)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    /// Count how many times a letter appears
    #[inline]
    #[must_use]
    pub fn count_of(&self, letter: char) -> usize {
        self.positions_of(letter).len()
    }

    /// Get the count of each letter in the word
    ///
    /// Used for feedback calculation with duplicate letters.
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<char, usize> {
        self.char_positions
            .iter()
            .map(|(&ch, positions)| (ch, positions.len()))
            .collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_normalizes() {
        let word = Word::new("  crane\t").unwrap();
        assert_eq!(word.text(), "CRANE");
        assert_eq!(word.chars(), &['C', 'R', 'A', 'N', 'E']);

        let word2 = Word::new("CrAnE").unwrap();
        assert_eq!(word2, word);
    }

    #[test]
    fn word_creation_rejects_empty() {
        assert_eq!(Word::new(""), Err(WordError::Empty));
        assert_eq!(Word::new("   "), Err(WordError::Empty));
        assert_eq!(Word::with_length(" ", 5), Err(WordError::Empty));
    }

    #[test]
    fn word_creation_invalid_length() {
        assert_eq!(
            Word::with_length("too long", 5),
            Err(WordError::InvalidLength {
                expected: 5,
                actual: 8
            })
        );
        assert_eq!(
            Word::with_length("shrt", 5),
            Err(WordError::InvalidLength {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::with_length("cran3", 5), Err(WordError::NonLetters)); // Number
        assert_eq!(Word::with_length("cr ne", 5), Err(WordError::NonLetters)); // Space
        assert_eq!(Word::with_length("cran!", 5), Err(WordError::NonLetters)); // Punctuation
    }

    #[test]
    fn length_counts_letters_after_uppercasing() {
        assert_eq!(
            Word::with_length("maßen", 5),
            Err(WordError::InvalidLength {
                expected: 5,
                actual: 6
            })
        );
        assert_eq!(Word::with_length("maßen", 6).unwrap().text(), "MASSEN");
    }

    #[test]
    fn word_accepts_other_lengths_when_configured() {
        let word = Word::with_length("planet", 6).unwrap();
        assert_eq!(word.len(), 6);
        assert_eq!(word.text(), "PLANET");
    }

    #[test]
    fn word_error_messages() {
        assert_eq!(
            WordError::InvalidLength {
                expected: 5,
                actual: 3
            }
            .to_string(),
            "guess must be 5 letters long"
        );
        assert_eq!(
            WordError::NonLetters.to_string(),
            "guess must contain only letters"
        );
    }

    #[test]
    fn word_positions_of_duplicates() {
        let word = Word::new("speed").unwrap();
        assert_eq!(word.positions_of('E'), &[2, 3]);
        assert_eq!(word.positions_of('S'), &[0]);
        assert_eq!(word.positions_of('Z'), &[] as &[usize]);
        assert_eq!(word.count_of('E'), 2);
        assert_eq!(word.count_of('X'), 0);
    }

    #[test]
    fn word_char_counts() {
        let word = Word::new("apple").unwrap();
        let counts = word.char_counts();
        assert_eq!(counts.get(&'P'), Some(&2));
        assert_eq!(counts.get(&'A'), Some(&1));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn word_display_and_parse() {
        let word: Word = "slate".parse().unwrap();
        assert_eq!(format!("{word}"), "SLATE");
        assert_eq!(word.chars()[4], 'E');
    }
}
