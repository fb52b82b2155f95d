//! Flat record tables shared by the in-memory and file repositories.
//!
//! `apply` validates a whole change set against the current rows before touching
//! anything, so a rejected change set leaves the tables unchanged.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{AttemptWrite, ChangeSet, RepositoryError, Result};
use crate::core::Feedback;
use crate::game::model::{
    AttemptHistoryEntry, AttemptId, AttemptRecord, DailyPuzzle, GuessAttempt, LetterEvaluation,
    PlayerId, PlayerPuzzleAttempt, PuzzleId, ScoredGuess,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub puzzles: Vec<DailyPuzzle>,
    pub attempts: Vec<PlayerPuzzleAttempt>,
    pub guesses: Vec<GuessAttempt>,
    pub evaluations: Vec<LetterEvaluation>,
}

impl Tables {
    pub fn puzzle_by_date(&self, date: NaiveDate) -> Option<DailyPuzzle> {
        self.puzzles
            .iter()
            .find(|puzzle| puzzle.puzzle_date == date)
            .cloned()
    }

    pub fn attempt(&self, player_id: PlayerId, puzzle_id: PuzzleId) -> Option<AttemptRecord> {
        self.attempts
            .iter()
            .find(|a| a.player_id == player_id && a.puzzle_id == puzzle_id)
            .map(|attempt| self.assemble(attempt))
    }

    pub fn attempts_for_puzzle(&self, puzzle_id: PuzzleId) -> Vec<AttemptRecord> {
        self.attempts
            .iter()
            .filter(|a| a.puzzle_id == puzzle_id)
            .map(|attempt| self.assemble(attempt))
            .collect()
    }

    pub fn attempts_for_player(&self, player_id: PlayerId) -> Vec<AttemptHistoryEntry> {
        let dates: FxHashMap<PuzzleId, NaiveDate> = self
            .puzzles
            .iter()
            .map(|puzzle| (puzzle.id, puzzle.puzzle_date))
            .collect();

        let mut history: Vec<AttemptHistoryEntry> = self
            .attempts
            .iter()
            .filter(|a| a.player_id == player_id)
            .map(|attempt| AttemptHistoryEntry {
                // Orphaned attempts fall back to the day they were started
                puzzle_date: dates
                    .get(&attempt.puzzle_id)
                    .copied()
                    .unwrap_or_else(|| attempt.created_on.date_naive()),
                attempt: attempt.clone(),
                guess_count: Some(self.guess_count(attempt.id)),
            })
            .collect();

        history.sort_by_key(|entry| (entry.puzzle_date, entry.attempt.created_on));
        history
    }

    /// Validate, then apply, a change set
    pub fn apply(&mut self, changes: ChangeSet) -> Result<()> {
        self.validate(&changes)?;

        for puzzle in changes.new_puzzles {
            self.puzzles.push(puzzle);
        }

        for (puzzle_id, solution) in changes.solutions {
            if let Some(puzzle) = self.puzzles.iter_mut().find(|p| p.id == puzzle_id) {
                puzzle.solution = Some(solution);
            }
        }

        for write in changes.attempts {
            match write {
                AttemptWrite::Insert(mut attempt) => {
                    attempt.version = 1;
                    self.attempts.push(attempt);
                }
                AttemptWrite::Update(mut attempt) => {
                    if let Some(stored) = self.attempts.iter_mut().find(|a| a.id == attempt.id) {
                        attempt.version = stored.version + 1;
                        *stored = attempt;
                    }
                }
            }
        }

        for scored in changes.guesses {
            self.evaluations.extend(scored.evaluations());
            self.guesses.push(scored.guess);
        }

        Ok(())
    }

    fn validate(&self, changes: &ChangeSet) -> Result<()> {
        let mut staged_dates: Vec<NaiveDate> = Vec::new();
        for puzzle in &changes.new_puzzles {
            if self.puzzle_by_date(puzzle.puzzle_date).is_some()
                || staged_dates.contains(&puzzle.puzzle_date)
            {
                return Err(RepositoryError::Conflict(format!(
                    "a puzzle for {} already exists",
                    puzzle.puzzle_date
                )));
            }
            if self.puzzles.iter().any(|p| p.id == puzzle.id) {
                return Err(RepositoryError::Conflict(format!(
                    "puzzle {} already exists",
                    puzzle.id
                )));
            }
            staged_dates.push(puzzle.puzzle_date);
        }

        // A stored solution is never replaced, only filled in
        for (puzzle_id, _) in &changes.solutions {
            if let Some(stored) = self.puzzles.iter().find(|p| p.id == *puzzle_id) {
                if stored.solution.as_deref().is_some_and(|s| !s.trim().is_empty()) {
                    return Err(RepositoryError::Conflict(format!(
                        "puzzle {puzzle_id} already has a solution"
                    )));
                }
            } else if !changes.new_puzzles.iter().any(|p| p.id == *puzzle_id) {
                return Err(RepositoryError::NotFound(format!("puzzle {puzzle_id}")));
            }
        }

        // Guess count per attempt as the change set is applied, in order
        let mut guess_counts: FxHashMap<AttemptId, u32> = FxHashMap::default();
        for write in &changes.attempts {
            let attempt = write.attempt();
            match write {
                AttemptWrite::Insert(_) => {
                    let duplicate = self.attempts.iter().any(|a| {
                        a.id == attempt.id
                            || (a.player_id == attempt.player_id
                                && a.puzzle_id == attempt.puzzle_id)
                    });
                    if duplicate || guess_counts.contains_key(&attempt.id) {
                        return Err(RepositoryError::Conflict(format!(
                            "player {} already has an attempt for puzzle {}",
                            attempt.player_id, attempt.puzzle_id
                        )));
                    }
                    guess_counts.insert(attempt.id, 0);
                }
                AttemptWrite::Update(_) => {
                    let stored = self
                        .attempts
                        .iter()
                        .find(|a| a.id == attempt.id)
                        .ok_or_else(|| RepositoryError::NotFound(format!("attempt {}", attempt.id)))?;
                    if stored.version != attempt.version {
                        return Err(RepositoryError::Conflict(format!(
                            "attempt {} is stale (stored version {}, written version {})",
                            attempt.id, stored.version, attempt.version
                        )));
                    }
                    if stored.player_id != attempt.player_id || stored.puzzle_id != attempt.puzzle_id {
                        return Err(RepositoryError::InvalidChange(format!(
                            "attempt {} cannot move to another player or puzzle",
                            attempt.id
                        )));
                    }
                    guess_counts.insert(attempt.id, self.guess_count(attempt.id));
                }
            }
        }

        for scored in &changes.guesses {
            let guess = &scored.guess;
            let Some(count) = guess_counts.get_mut(&guess.attempt_id) else {
                // Guesses must travel with a write of their attempt so the version is checked
                return Err(RepositoryError::InvalidChange(format!(
                    "guess {} is not accompanied by a write of attempt {}",
                    guess.id, guess.attempt_id
                )));
            };
            if guess.guess_number != *count + 1 {
                return Err(RepositoryError::Conflict(format!(
                    "attempt {} expected guess number {}, got {}",
                    guess.attempt_id,
                    *count + 1,
                    guess.guess_number
                )));
            }
            *count += 1;

            if self.guesses.iter().any(|g| g.id == guess.id) {
                return Err(RepositoryError::Conflict(format!(
                    "guess {} already exists",
                    guess.id
                )));
            }

            let positions_ok = scored.feedback.len() == guess.word.chars().count()
                && scored
                    .feedback
                    .marks()
                    .iter()
                    .enumerate()
                    .all(|(i, mark)| mark.position == i);
            if !positions_ok {
                return Err(RepositoryError::InvalidChange(format!(
                    "guess {} needs exactly one evaluation per position",
                    guess.id
                )));
            }
        }

        Ok(())
    }

    fn guess_count(&self, attempt_id: AttemptId) -> u32 {
        self.guesses
            .iter()
            .filter(|g| g.attempt_id == attempt_id)
            .count() as u32
    }

    fn assemble(&self, attempt: &PlayerPuzzleAttempt) -> AttemptRecord {
        let mut guesses: Vec<&GuessAttempt> = self
            .guesses
            .iter()
            .filter(|g| g.attempt_id == attempt.id)
            .collect();
        guesses.sort_by_key(|g| g.guess_number);

        let guesses = guesses
            .into_iter()
            .map(|guess| {
                let marks = self
                    .evaluations
                    .iter()
                    .filter(|e| e.guess_id == guess.id)
                    .map(LetterEvaluation::mark)
                    .collect();
                ScoredGuess {
                    guess: guess.clone(),
                    feedback: Feedback::from_marks(marks),
                }
            })
            .collect();

        AttemptRecord {
            attempt: attempt.clone(),
            guesses,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::core::Word;
    use crate::game::model::GuessId;
    use chrono::{DateTime, Utc};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn instant(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    pub fn puzzle(on: NaiveDate, solution: &str) -> DailyPuzzle {
        DailyPuzzle {
            id: PuzzleId::new(),
            puzzle_date: on,
            solution: Some(solution.to_string()),
            archived: false,
        }
    }

    pub fn scored(attempt_id: AttemptId, number: u32, guess: &str, solution: &str) -> ScoredGuess {
        let guess_word = Word::new(guess).unwrap();
        let solution_word = Word::new(solution).unwrap();
        ScoredGuess {
            guess: GuessAttempt {
                id: GuessId::new(),
                attempt_id,
                guess_number: number,
                word: guess_word.text().to_string(),
            },
            feedback: Feedback::calculate(&guess_word, &solution_word).unwrap(),
        }
    }
}
