//! In-memory repository, used by tests and throwaway sessions.

use std::sync::RwLock;

use chrono::NaiveDate;

use super::tables::Tables;
use super::{ChangeSet, GameRepository, RepositoryError, Result};
use crate::game::model::{AttemptHistoryEntry, AttemptRecord, DailyPuzzle, PlayerId, PuzzleId};

/// Thread-safe repository that keeps every table in memory
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    tables: RwLock<Tables>,
}

impl InMemoryGameRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored guesses, across all attempts
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::LockPoisoned` if a writer panicked.
    pub fn guess_count(&self) -> Result<usize> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.guesses.len())
    }

    /// Number of stored attempts
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::LockPoisoned` if a writer panicked.
    pub fn attempt_count(&self) -> Result<usize> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.attempts.len())
    }
}

impl GameRepository for InMemoryGameRepository {
    fn puzzle_by_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.puzzle_by_date(date))
    }

    fn attempt(&self, player_id: PlayerId, puzzle_id: PuzzleId) -> Result<Option<AttemptRecord>> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.attempt(player_id, puzzle_id))
    }

    fn attempts_for_puzzle(&self, puzzle_id: PuzzleId) -> Result<Vec<AttemptRecord>> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.attempts_for_puzzle(puzzle_id))
    }

    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<AttemptHistoryEntry>> {
        let tables = self.tables.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.attempts_for_player(player_id))
    }

    fn save(&self, changes: ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        tables.apply(changes)
    }
}
