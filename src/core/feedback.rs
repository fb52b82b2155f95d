//! Wordle feedback calculation and representation
//!
//! Feedback is an ordered list of letter marks, one per position:
//! - Absent (letter not in the solution, or all copies already accounted for)
//! - Present (letter in the solution, wrong position)
//! - Correct (letter in the correct position)

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterResult {
    Absent,
    Present,
    Correct,
}

impl LetterResult {
    /// Whether the letter is known to be in the solution
    #[inline]
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Present | Self::Correct)
    }

    /// Emoji tile for this result
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// One scored letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterMark {
    pub position: usize,
    pub letter: char,
    pub result: LetterResult,
}

/// Raised when a guess and a solution cannot be compared
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot score a {guess}-letter guess against a {solution}-letter solution")]
pub struct LengthMismatch {
    pub guess: usize,
    pub solution: usize,
}

/// Feedback for a guess: exactly one mark per position, in position order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback(Vec<LetterMark>);

impl Feedback {
    /// Calculate the feedback when `guess` is played against `solution`
    ///
    /// This implements Wordle's exact feedback rules, including proper handling
    /// of duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: Mark all exact matches and remove them from the available pool
    /// 2. Second pass: Mark present-but-wrong-position letters from the remaining pool
    ///
    /// # Errors
    /// Returns `LengthMismatch` if the words differ in length.
    ///
    /// # Examples
    /// ```
    /// use wordle_tracker::core::{Feedback, LetterResult, Word};
    ///
    /// let guess = Word::new("alley").unwrap();
    /// let solution = Word::new("apple").unwrap();
    /// let feedback = Feedback::calculate(&guess, &solution).unwrap();
    ///
    /// assert_eq!(
    ///     feedback.results(),
    ///     vec![
    ///         LetterResult::Correct,
    ///         LetterResult::Present,
    ///         LetterResult::Absent,
    ///         LetterResult::Present,
    ///         LetterResult::Absent,
    ///     ]
    /// );
    /// ```
    pub fn calculate(guess: &Word, solution: &Word) -> Result<Self, LengthMismatch> {
        if guess.len() != solution.len() {
            return Err(LengthMismatch {
                guess: guess.len(),
                solution: solution.len(),
            });
        }

        let mut result = vec![LetterResult::Absent; guess.len()];
        let mut solution_available = solution.char_counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess.chars().iter().zip(solution.chars()).enumerate() {
            if g == s {
                result[i] = LetterResult::Correct;
                if let Some(count) = solution_available.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but an unconsumed copy exists
        for (i, &letter) in guess.chars().iter().enumerate() {
            if result[i] == LetterResult::Correct {
                continue;
            }
            if let Some(count) = solution_available.get_mut(&letter)
                && *count > 0
            {
                result[i] = LetterResult::Present;
                *count -= 1;
            }
        }

        let marks = guess
            .chars()
            .iter()
            .zip(result)
            .enumerate()
            .map(|(position, (&letter, result))| LetterMark {
                position,
                letter,
                result,
            })
            .collect();

        Ok(Self(marks))
    }

    /// Build feedback from stored marks, ordering them by position
    #[must_use]
    pub fn from_marks(mut marks: Vec<LetterMark>) -> Self {
        marks.sort_by_key(|mark| mark.position);
        Self(marks)
    }

    /// The scored letters, in position order
    #[inline]
    #[must_use]
    pub fn marks(&self) -> &[LetterMark] {
        &self.0
    }

    /// Just the results, in position order
    #[must_use]
    pub fn results(&self) -> Vec<LetterResult> {
        self.0.iter().map(|mark| mark.result).collect()
    }

    /// Number of scored letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every letter is correct
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|mark| mark.result == LetterResult::Correct)
    }

    /// Count the number of correct letters
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.count(LetterResult::Correct)
    }

    /// Count the number of present letters
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.count(LetterResult::Present)
    }

    fn count(&self, result: LetterResult) -> usize {
        self.0.iter().filter(|mark| mark.result == result).count()
    }

    /// Parse results from a string like "GY-GY" or "🟩🟨⬜🟩🟨" for the given letters
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for correct
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/⬜ for absent
    ///
    /// # Examples
    /// ```
    /// use wordle_tracker::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let p1 = Feedback::parse(&guess, "GY-GY").unwrap();
    /// let p2 = Feedback::parse(&guess, "🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// ```
    #[must_use]
    pub fn parse(guess: &Word, s: &str) -> Option<Self> {
        let symbols: Vec<char> = s.trim().chars().collect();
        if symbols.len() != guess.len() {
            return None;
        }

        let mut marks = Vec::with_capacity(symbols.len());
        for (position, (&symbol, &letter)) in symbols.iter().zip(guess.chars()).enumerate() {
            let result = match symbol {
                'G' | 'g' | '🟩' => LetterResult::Correct,
                'Y' | 'y' | '🟨' => LetterResult::Present,
                '-' | '_' | '⬜' => LetterResult::Absent,
                _ => return None,
            };
            marks.push(LetterMark {
                position,
                letter,
                result,
            });
        }

        Some(Self(marks))
    }

    /// Convert feedback to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|mark| mark.result.emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterResult::{Absent, Correct, Present};

    fn score(guess: &str, solution: &str) -> Vec<LetterResult> {
        let guess = Word::new(guess).unwrap();
        let solution = Word::new(solution).unwrap();
        Feedback::calculate(&guess, &solution).unwrap().results()
    }

    #[test]
    fn feedback_all_absent() {
        assert_eq!(score("abcde", "fghij"), vec![Absent; 5]);
    }

    #[test]
    fn feedback_solution_against_itself_is_solved() {
        for word in ["crane", "slate", "apple", "zzzzz", "aaaaa"] {
            let w = Word::new(word).unwrap();
            let feedback = Feedback::calculate(&w, &w).unwrap();
            assert!(feedback.is_solved(), "{word} should score all correct");
            assert_eq!(feedback.count_correct(), 5);
        }
    }

    #[test]
    fn feedback_repeated_letter_consumes_single_copy() {
        // APPLE has a single L: the first L in ALLEY takes it
        assert_eq!(
            score("alley", "apple"),
            vec![Correct, Present, Absent, Present, Absent]
        );
    }

    #[test]
    fn feedback_correct_takes_priority_over_present() {
        // ROBOT vs FLOOR: the second O is correct, the first only present
        assert_eq!(
            score("robot", "floor"),
            vec![Present, Present, Absent, Correct, Absent]
        );
    }

    #[test]
    fn feedback_duplicate_letters_both_present() {
        // SPEED vs ERASE: ERASE holds two Es
        assert_eq!(
            score("speed", "erase"),
            vec![Present, Absent, Present, Present, Absent]
        );
    }

    #[test]
    fn feedback_never_over_credits_a_letter() {
        let solutions = ["apple", "erase", "floor", "llama", "mamma", "geese"];
        let guesses = ["alley", "eerie", "lolly", "mamma", "sassy", "melee", "ppppp"];

        for solution in solutions {
            let solution_word = Word::new(solution).unwrap();
            for guess in guesses {
                let guess_word = Word::new(guess).unwrap();
                let feedback = Feedback::calculate(&guess_word, &solution_word).unwrap();

                for &letter in guess_word.chars() {
                    let credited = feedback
                        .marks()
                        .iter()
                        .filter(|m| m.letter == letter && m.result.is_revealed())
                        .count();
                    assert!(
                        credited <= solution_word.count_of(letter),
                        "{guess} vs {solution}: {letter} credited {credited} times"
                    );
                }
            }
        }
    }

    #[test]
    fn feedback_marks_carry_positions_and_letters() {
        let guess = Word::new("crane").unwrap();
        let solution = Word::new("slate").unwrap();
        let feedback = Feedback::calculate(&guess, &solution).unwrap();

        assert_eq!(feedback.len(), 5);
        let third = feedback.marks()[2];
        assert_eq!(third.position, 2);
        assert_eq!(third.letter, 'A');
        assert_eq!(third.result, Correct);
        assert_eq!(feedback.count_correct(), 2);
        assert_eq!(feedback.count_present(), 0);
    }

    #[test]
    fn feedback_length_mismatch_is_an_error() {
        let guess = Word::new("crane").unwrap();
        let solution = Word::new("planet").unwrap();
        assert_eq!(
            Feedback::calculate(&guess, &solution),
            Err(LengthMismatch {
                guess: 5,
                solution: 6
            })
        );
    }

    #[test]
    fn feedback_parse_valid_and_invalid() {
        let guess = Word::new("crane").unwrap();
        let parsed = Feedback::parse(&guess, "gyg__").unwrap();
        assert_eq!(parsed.results(), vec![Correct, Present, Correct, Absent, Absent]);

        assert!(Feedback::parse(&guess, "GYGGYX").is_none()); // Too long
        assert!(Feedback::parse(&guess, "GYG").is_none()); // Too short
        assert!(Feedback::parse(&guess, "GXGGY").is_none()); // Invalid char
    }

    #[test]
    fn feedback_from_marks_orders_by_position() {
        let marks = vec![
            LetterMark {
                position: 1,
                letter: 'B',
                result: Absent,
            },
            LetterMark {
                position: 0,
                letter: 'A',
                result: Correct,
            },
        ];
        let feedback = Feedback::from_marks(marks);
        assert_eq!(feedback.marks()[0].letter, 'A');
        assert_eq!(feedback.to_emoji(), "🟩⬜");
    }
}
