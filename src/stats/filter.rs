//! Which attempts count towards a player's statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::game::model::{AttemptHistoryEntry, AttemptStatus};

/// Attempt filter; the default includes everything except practice attempts
/// in the headline numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct StatisticsFilter {
    pub include_hard_mode: bool,
    pub include_easy_mode: bool,
    pub include_before_reveal: bool,
    pub include_after_reveal: bool,
    pub include_solved: bool,
    pub include_failed: bool,
    pub include_in_progress: bool,
    /// Fold attempts started after the reveal into the headline numbers
    pub count_practice_attempts: bool,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub min_guess_count: Option<u32>,
    pub max_guess_count: Option<u32>,
}

impl Default for StatisticsFilter {
    fn default() -> Self {
        Self {
            include_hard_mode: true,
            include_easy_mode: true,
            include_before_reveal: true,
            include_after_reveal: true,
            include_solved: true,
            include_failed: true,
            include_in_progress: true,
            count_practice_attempts: false,
            from_date: None,
            to_date: None,
            min_guess_count: None,
            max_guess_count: None,
        }
    }
}

impl StatisticsFilter {
    /// Whether an entry passes every criterion
    #[must_use]
    pub fn matches(&self, entry: &AttemptHistoryEntry, after_reveal: bool) -> bool {
        let reveal_ok = if after_reveal {
            self.include_after_reveal
        } else {
            self.include_before_reveal
        };
        let mode_ok = if entry.attempt.hard_mode {
            self.include_hard_mode
        } else {
            self.include_easy_mode
        };
        let status_ok = match entry.attempt.status {
            AttemptStatus::Solved => self.include_solved,
            AttemptStatus::Failed => self.include_failed,
            AttemptStatus::InProgress => self.include_in_progress,
        };
        if !(reveal_ok && mode_ok && status_ok) {
            return false;
        }

        let date = entry.puzzle_date;
        if self.from_date.is_some_and(|from| date < from) || self.to_date.is_some_and(|to| date > to) {
            return false;
        }

        let guesses = entry.guess_count.unwrap_or(0);
        !(self.min_guess_count.is_some_and(|min| guesses < min)
            || self.max_guess_count.is_some_and(|max| guesses > max))
    }
}
