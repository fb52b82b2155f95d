//! Hard mode constraints
//!
//! Once a letter is revealed, later guesses must use it: green letters stay in
//! place and every revealed letter appears at least as often as it was revealed
//! within a single guess.

use rustc_hash::FxHashMap;

use super::HardModeViolation;
use crate::core::{Feedback, LetterResult, Word};

/// Constraints accumulated from an attempt's prior guesses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardModeConstraints {
    fixed: Vec<(usize, char)>,
    required: FxHashMap<char, usize>,
}

impl HardModeConstraints {
    /// Derive constraints from the feedback of every prior guess
    #[must_use]
    pub fn from_feedback<'a>(history: impl IntoIterator<Item = &'a Feedback>) -> Self {
        let mut constraints = Self::default();

        for feedback in history {
            let mut revealed: FxHashMap<char, usize> = FxHashMap::default();
            for mark in feedback.marks() {
                if !mark.result.is_revealed() {
                    continue;
                }
                *revealed.entry(mark.letter).or_insert(0) += 1;
                if mark.result == LetterResult::Correct
                    && !constraints.fixed.contains(&(mark.position, mark.letter))
                {
                    constraints.fixed.push((mark.position, mark.letter));
                }
            }

            for (letter, count) in revealed {
                let needed = constraints.required.entry(letter).or_insert(0);
                *needed = (*needed).max(count);
            }
        }

        constraints.fixed.sort_unstable();
        constraints
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.required.is_empty()
    }

    /// Letters pinned to a position
    #[must_use]
    pub fn fixed_positions(&self) -> &[(usize, char)] {
        &self.fixed
    }

    /// Minimum number of times `letter` must appear
    #[must_use]
    pub fn required_count(&self, letter: char) -> usize {
        self.required.get(&letter).copied().unwrap_or(0)
    }

    /// Check a guess, position constraints first
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn check(&self, guess: &Word) -> Result<(), HardModeViolation> {
        let moved = self
            .fixed
            .iter()
            .any(|&(position, letter)| guess.chars().get(position) != Some(&letter));
        if moved {
            return Err(HardModeViolation::MovedCorrectLetter);
        }

        let missing = self
            .required
            .iter()
            .any(|(&letter, &count)| guess.count_of(letter) < count);
        if missing {
            return Err(HardModeViolation::MissingRevealedLetter);
        }

        Ok(())
    }
}
