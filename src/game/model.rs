//! Persisted game records
//!
//! Records reference their parent by id only. Reads hand out owned aggregates
//! (`AttemptRecord`) assembled from the flat tables.

use crate::core::{Feedback, LetterMark, LetterResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_type!(
    /// Identifies a daily puzzle
    PuzzleId
);
id_type!(
    /// Identifies one player's attempt at one puzzle
    AttemptId
);
id_type!(
    /// Identifies a single guess
    GuessId
);
id_type!(
    /// Identifies a player
    PlayerId
);

impl PlayerId {
    /// Stable id derived from a player name, so the CLI can address players by name
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            name.trim().to_lowercase().as_bytes(),
        ))
    }
}

/// One puzzle per calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    pub id: PuzzleId,
    pub puzzle_date: NaiveDate,
    /// Assigned lazily on first access
    pub solution: Option<String>,
    pub archived: bool,
}

/// Lifecycle of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptStatus {
    InProgress,
    Solved,
    Failed,
}

impl AttemptStatus {
    /// Solved and Failed accept no further guesses
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InProgress => "in progress",
            Self::Solved => "solved",
            Self::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// A player's play-through of one day's puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPuzzleAttempt {
    pub id: AttemptId,
    pub player_id: PlayerId,
    pub puzzle_id: PuzzleId,
    pub status: AttemptStatus,
    pub created_on: DateTime<Utc>,
    pub completed_on: Option<DateTime<Utc>>,
    pub hard_mode: bool,
    /// Bumped by the repository on every successful save
    pub version: u64,
}

impl PlayerPuzzleAttempt {
    /// A fresh in-progress attempt that has never been saved
    #[must_use]
    pub fn start(
        player_id: PlayerId,
        puzzle_id: PuzzleId,
        created_on: DateTime<Utc>,
        hard_mode: bool,
    ) -> Self {
        Self {
            id: AttemptId::new(),
            player_id,
            puzzle_id,
            status: AttemptStatus::InProgress,
            created_on,
            completed_on: None,
            hard_mode,
            version: 0,
        }
    }

    /// Move to a terminal status, keeping an earlier completion time if one exists
    pub fn complete(&mut self, status: AttemptStatus, at: DateTime<Utc>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.completed_on.get_or_insert(at);
    }
}

/// A single submitted guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAttempt {
    pub id: GuessId,
    pub attempt_id: AttemptId,
    /// 1-based, sequential within the attempt
    pub guess_number: u32,
    pub word: String,
}

/// Stored result for one letter of one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterEvaluation {
    pub guess_id: GuessId,
    pub position: usize,
    pub letter: char,
    pub result: LetterResult,
}

impl LetterEvaluation {
    #[must_use]
    pub const fn mark(&self) -> LetterMark {
        LetterMark {
            position: self.position,
            letter: self.letter,
            result: self.result,
        }
    }
}

/// A guess together with its feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredGuess {
    pub guess: GuessAttempt,
    pub feedback: Feedback,
}

impl ScoredGuess {
    /// Flat evaluation rows for storage
    #[must_use]
    pub fn evaluations(&self) -> Vec<LetterEvaluation> {
        self.feedback
            .marks()
            .iter()
            .map(|mark| LetterEvaluation {
                guess_id: self.guess.id,
                position: mark.position,
                letter: mark.letter,
                result: mark.result,
            })
            .collect()
    }
}

/// An attempt with its guesses in guess-number order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt: PlayerPuzzleAttempt,
    pub guesses: Vec<ScoredGuess>,
}

impl AttemptRecord {
    #[must_use]
    pub fn new(attempt: PlayerPuzzleAttempt) -> Self {
        Self {
            attempt,
            guesses: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn guess_count(&self) -> u32 {
        self.guesses.len() as u32
    }

    #[must_use]
    pub fn last_guess(&self) -> Option<&ScoredGuess> {
        self.guesses.last()
    }
}

/// A player's attempt joined with its puzzle date, as used for statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptHistoryEntry {
    pub puzzle_date: NaiveDate,
    pub attempt: PlayerPuzzleAttempt,
    pub guess_count: Option<u32>,
}
