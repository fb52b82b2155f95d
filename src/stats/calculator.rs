//! Win/loss totals and streaks
//!
//! Streaks run over puzzle dates: a day with any solved attempt extends the
//! streak, any other counted day or a skipped day resets it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::StatisticsFilter;
use crate::game::model::{AttemptHistoryEntry, AttemptStatus};

/// Aggregate numbers for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub total_attempts: usize,
    pub wins: usize,
    pub failures: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Mean over counted attempts that have a guess count
    pub average_guess_count: Option<f64>,
    /// Filtered attempts started after their puzzle's reveal
    pub practice_attempts: usize,
    /// Counted solved attempts keyed by number of guesses
    pub guess_distribution: BTreeMap<u32, usize>,
}

impl PlayerStatistics {
    /// Share of counted attempts that were solved, from 0 to 1
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        (self.total_attempts > 0).then(|| self.wins as f64 / self.total_attempts as f64)
    }
}

pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Compute statistics over a player's history
    ///
    /// `is_after_reveal` classifies each attempt as practice (true) or competitive.
    pub fn calculate<F>(
        history: &[AttemptHistoryEntry],
        filter: &StatisticsFilter,
        is_after_reveal: F,
    ) -> PlayerStatistics
    where
        F: Fn(&AttemptHistoryEntry) -> bool,
    {
        let filtered: Vec<(&AttemptHistoryEntry, bool)> = history
            .iter()
            .map(|entry| (entry, is_after_reveal(entry)))
            .filter(|(entry, after)| filter.matches(entry, *after))
            .collect();

        let practice_attempts = filtered.iter().filter(|(_, after)| *after).count();
        let counted: Vec<&AttemptHistoryEntry> = filtered
            .into_iter()
            .filter(|(_, after)| filter.count_practice_attempts || !*after)
            .map(|(entry, _)| entry)
            .collect();

        let wins = counted
            .iter()
            .filter(|e| e.attempt.status == AttemptStatus::Solved)
            .count();
        let failures = counted
            .iter()
            .filter(|e| e.attempt.status == AttemptStatus::Failed)
            .count();

        let guess_counts: Vec<u32> = counted.iter().filter_map(|e| e.guess_count).collect();
        let average_guess_count = (!guess_counts.is_empty()).then(|| {
            f64::from(guess_counts.iter().sum::<u32>()) / guess_counts.len() as f64
        });

        let mut guess_distribution = BTreeMap::new();
        for entry in counted
            .iter()
            .filter(|e| e.attempt.status == AttemptStatus::Solved)
        {
            if let Some(guesses) = entry.guess_count {
                *guess_distribution.entry(guesses).or_insert(0) += 1;
            }
        }

        let (current_streak, longest_streak) = Self::streaks(&counted);

        PlayerStatistics {
            total_attempts: counted.len(),
            wins,
            failures,
            current_streak,
            longest_streak,
            average_guess_count,
            practice_attempts,
            guess_distribution,
        }
    }

    /// (current, longest) over the given attempts
    #[must_use]
    pub fn streaks(attempts: &[&AttemptHistoryEntry]) -> (u32, u32) {
        let mut days: Vec<(NaiveDate, bool)> = Vec::new();
        let mut sorted: Vec<&AttemptHistoryEntry> = attempts.to_vec();
        sorted.sort_by_key(|entry| entry.puzzle_date);

        for entry in sorted {
            let solved = entry.attempt.status == AttemptStatus::Solved;
            match days.last_mut() {
                Some((date, any_solved)) if *date == entry.puzzle_date => *any_solved |= solved,
                _ => days.push((entry.puzzle_date, solved)),
            }
        }

        let mut streak = 0;
        let mut longest = 0;
        let mut previous: Option<NaiveDate> = None;

        for (date, solved) in days {
            if previous.is_some_and(|prev| (date - prev).num_days() > 1) {
                streak = 0;
            }
            streak = if solved { streak + 1 } else { 0 };
            longest = longest.max(streak);
            previous = Some(date);
        }

        (streak, longest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::model::{PlayerId, PlayerPuzzleAttempt, PuzzleId};
    use chrono::{DateTime, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn entry(d: u32, status: AttemptStatus, guesses: u32) -> AttemptHistoryEntry {
        let mut attempt = PlayerPuzzleAttempt::start(
            PlayerId::new(),
            PuzzleId::new(),
            DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            true,
        );
        attempt.status = status;
        AttemptHistoryEntry {
            puzzle_date: day(d),
            attempt,
            guess_count: Some(guesses),
        }
    }

    fn competitive(_: &AttemptHistoryEntry) -> bool {
        false
    }

    fn stats(history: &[AttemptHistoryEntry]) -> PlayerStatistics {
        StatisticsCalculator::calculate(history, &StatisticsFilter::default(), competitive)
    }

    #[test]
    fn empty_history() {
        let stats = stats(&[]);
        assert_eq!(stats, PlayerStatistics::default());
        assert_eq!(stats.win_rate(), None);
    }

    #[test]
    fn consecutive_wins_build_a_streak() {
        let history = [
            entry(1, AttemptStatus::Solved, 3),
            entry(2, AttemptStatus::Solved, 4),
            entry(3, AttemptStatus::Solved, 5),
        ];
        let stats = stats(&history);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.average_guess_count, Some(4.0));
        assert_eq!(
            stats.guess_distribution,
            BTreeMap::from([(3, 1), (4, 1), (5, 1)])
        );
    }

    #[test]
    fn one_day_gap_resets_before_counting_the_new_day() {
        let history = [
            entry(1, AttemptStatus::Solved, 3),
            entry(2, AttemptStatus::Solved, 3),
            entry(4, AttemptStatus::Solved, 3),
        ];
        let stats = stats(&history);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn failure_resets_the_streak() {
        let history = [
            entry(1, AttemptStatus::Solved, 2),
            entry(2, AttemptStatus::Solved, 2),
            entry(3, AttemptStatus::Solved, 2),
            entry(4, AttemptStatus::Failed, 6),
            entry(5, AttemptStatus::Solved, 4),
        ];
        let stats = stats(&history);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.total_attempts, 5);
        assert_eq!(stats.guess_distribution.get(&2), Some(&3));
        assert_eq!(stats.guess_distribution.get(&6), None);
        assert_eq!(stats.win_rate(), Some(0.8));
    }

    #[test]
    fn input_order_does_not_matter() {
        let history = [
            entry(3, AttemptStatus::Solved, 2),
            entry(1, AttemptStatus::Solved, 2),
            entry(2, AttemptStatus::Solved, 2),
        ];
        assert_eq!(stats(&history).current_streak, 3);
    }

    #[test]
    fn in_progress_day_resets_the_running_streak() {
        let history = [
            entry(1, AttemptStatus::Solved, 2),
            entry(2, AttemptStatus::InProgress, 1),
        ];
        let stats = stats(&history);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 1);
    }

    #[test]
    fn practice_attempts_are_separate_by_default() {
        let history = [
            entry(1, AttemptStatus::Solved, 3),
            entry(2, AttemptStatus::Solved, 3),
        ];
        let practice_on_day_two = |e: &AttemptHistoryEntry| e.puzzle_date == day(2);

        let default = StatisticsCalculator::calculate(
            &history,
            &StatisticsFilter::default(),
            practice_on_day_two,
        );
        assert_eq!(default.total_attempts, 1);
        assert_eq!(default.practice_attempts, 1);
        assert_eq!(default.current_streak, 1);

        let folded = StatisticsCalculator::calculate(
            &history,
            &StatisticsFilter {
                count_practice_attempts: true,
                ..StatisticsFilter::default()
            },
            practice_on_day_two,
        );
        assert_eq!(folded.total_attempts, 2);
        assert_eq!(folded.practice_attempts, 1);
        assert_eq!(folded.current_streak, 2);
    }

    #[test]
    fn excluded_after_reveal_attempts_are_not_practice() {
        let history = [entry(1, AttemptStatus::Solved, 3)];
        let stats = StatisticsCalculator::calculate(
            &history,
            &StatisticsFilter {
                include_after_reveal: false,
                ..StatisticsFilter::default()
            },
            |_| true,
        );
        assert_eq!(stats.practice_attempts, 0);
        assert_eq!(stats.total_attempts, 0);
    }
}
