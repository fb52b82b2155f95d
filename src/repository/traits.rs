//! Repository contract for game records.

use chrono::NaiveDate;

use super::Result;
use crate::game::model::{
    AttemptHistoryEntry, AttemptRecord, DailyPuzzle, PlayerId, PlayerPuzzleAttempt, PuzzleId,
    ScoredGuess,
};

/// Storage for puzzles, attempts, guesses and letter evaluations
///
/// Reads return owned snapshots. All writes go through [`GameRepository::save`],
/// which either applies a whole [`ChangeSet`] or none of it.
pub trait GameRepository: Send + Sync {
    /// Puzzle for a calendar day, if one was created
    fn puzzle_by_date(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>>;

    /// The attempt for a (player, puzzle) pair, with guesses in order
    fn attempt(&self, player_id: PlayerId, puzzle_id: PuzzleId) -> Result<Option<AttemptRecord>>;

    /// Every attempt made at a puzzle
    fn attempts_for_puzzle(&self, puzzle_id: PuzzleId) -> Result<Vec<AttemptRecord>>;

    /// A player's full history, oldest puzzle first
    fn attempts_for_player(&self, player_id: PlayerId) -> Result<Vec<AttemptHistoryEntry>>;

    /// Atomically apply a change set
    ///
    /// Fails with `RepositoryError::Conflict` if an attempt's version is stale, a
    /// second attempt is inserted for the same (player, puzzle) pair, a second
    /// puzzle is inserted for the same date, or a solution is set on a puzzle that
    /// already has one.
    fn save(&self, changes: ChangeSet) -> Result<()>;
}

/// How a change set touches an attempt row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptWrite {
    Insert(PlayerPuzzleAttempt),
    /// Replace the stored row; `attempt.version` must equal the stored version
    Update(PlayerPuzzleAttempt),
}

impl AttemptWrite {
    #[must_use]
    pub const fn attempt(&self) -> &PlayerPuzzleAttempt {
        match self {
            Self::Insert(attempt) | Self::Update(attempt) => attempt,
        }
    }
}

/// Pending writes staged by one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub new_puzzles: Vec<DailyPuzzle>,
    pub solutions: Vec<(PuzzleId, String)>,
    pub attempts: Vec<AttemptWrite>,
    pub guesses: Vec<ScoredGuess>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert_puzzle(mut self, puzzle: DailyPuzzle) -> Self {
        self.new_puzzles.push(puzzle);
        self
    }

    /// Fill in a puzzle's missing solution
    #[must_use]
    pub fn set_solution(mut self, puzzle_id: PuzzleId, solution: impl Into<String>) -> Self {
        self.solutions.push((puzzle_id, solution.into()));
        self
    }

    #[must_use]
    pub fn insert_attempt(mut self, attempt: PlayerPuzzleAttempt) -> Self {
        self.attempts.push(AttemptWrite::Insert(attempt));
        self
    }

    #[must_use]
    pub fn update_attempt(mut self, attempt: PlayerPuzzleAttempt) -> Self {
        self.attempts.push(AttemptWrite::Update(attempt));
        self
    }

    #[must_use]
    pub fn add_guess(mut self, guess: ScoredGuess) -> Self {
        self.guesses.push(guess);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_puzzles.is_empty()
            && self.solutions.is_empty()
            && self.attempts.is_empty()
            && self.guesses.is_empty()
    }
}
