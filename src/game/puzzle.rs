//! Daily puzzle lookup and solution sources
//!
//! A puzzle row is created the first time anyone asks for a day. Its solution
//! comes from the official provider when one is configured, otherwise (or when
//! the provider fails and fallback is enabled) from a fixed rotation of words.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{GameError, Result};
use crate::core::{Word, WordError};
use crate::game::model::{DailyPuzzle, PuzzleId};
use crate::repository::{ChangeSet, GameRepository};
use crate::wordlists::SOLUTIONS;

/// Why an official solution could not be produced
#[derive(Debug, Error)]
pub enum PuzzleSourceError {
    #[error("failed to read schedule {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schedule {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no official solution for {0}")]
    MissingDate(NaiveDate),

    #[error("official solution {word:?} for {date} is unusable: {source}")]
    InvalidWord {
        date: NaiveDate,
        word: String,
        #[source]
        source: WordError,
    },
}

/// Source of the official solution for a day
pub trait OfficialWordProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns a `PuzzleSourceError` when no solution can be produced for `date`.
    fn solution_for(&self, date: NaiveDate) -> std::result::Result<String, PuzzleSourceError>;
}

/// Official solutions read from a JSON schedule file
///
/// The file maps dates to words: `{ "2025-01-01": "SLATE" }`. It is re-read on
/// each lookup so edits take effect without a restart.
#[derive(Debug, Clone)]
pub struct ScheduleFileProvider {
    path: PathBuf,
}

impl ScheduleFileProvider {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> std::result::Result<BTreeMap<NaiveDate, String>, PuzzleSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| PuzzleSourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| PuzzleSourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl OfficialWordProvider for ScheduleFileProvider {
    fn solution_for(&self, date: NaiveDate) -> std::result::Result<String, PuzzleSourceError> {
        self.load()?
            .remove(&date)
            .ok_or(PuzzleSourceError::MissingDate(date))
    }
}

/// Deterministic solution rotation
///
/// Day offsets are counted from 2025-01-01, which maps to the first word.
#[derive(Debug, Clone)]
pub struct WordSelector {
    words: Vec<String>,
}

impl WordSelector {
    #[must_use]
    pub fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Rotation over the embedded solution list, restricted to `word_length`
    #[must_use]
    pub fn embedded(word_length: usize) -> Self {
        Self::from_words(
            SOLUTIONS
                .iter()
                .filter(|word| word.chars().count() == word_length)
                .map(ToString::to_string),
        )
    }

    #[must_use]
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The rotation word for `date`, or `None` if the rotation is empty
    #[must_use]
    pub fn solution_for(&self, date: NaiveDate) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        let offset = (date - Self::anchor()).num_days();
        let index = offset.rem_euclid(self.words.len() as i64) as usize;
        self.words.get(index).map(String::as_str)
    }
}

/// Finds or creates the puzzle for a day
#[derive(Clone)]
pub struct DailyPuzzleService {
    repo: Arc<dyn GameRepository>,
    selector: WordSelector,
    provider: Option<Arc<dyn OfficialWordProvider>>,
    fallback_to_word_list: bool,
    word_length: usize,
}

impl DailyPuzzleService {
    #[must_use]
    pub fn new(repo: Arc<dyn GameRepository>, selector: WordSelector, word_length: usize) -> Self {
        Self {
            repo,
            selector,
            provider: None,
            fallback_to_word_list: true,
            word_length,
        }
    }

    /// Prefer an official provider, optionally falling back to the rotation
    #[must_use]
    pub fn with_provider(
        mut self,
        provider: Arc<dyn OfficialWordProvider>,
        fallback_to_word_list: bool,
    ) -> Self {
        self.provider = Some(provider);
        self.fallback_to_word_list = fallback_to_word_list;
        self
    }

    /// The puzzle for `date`, created on first access
    ///
    /// # Errors
    ///
    /// Returns `GameError::Unavailable` if no solution can be resolved, and
    /// `GameError::Repository` if storage fails.
    pub fn get_or_create_puzzle(&self, date: NaiveDate) -> Result<DailyPuzzle> {
        if let Some(mut existing) = self.repo.puzzle_by_date(date)? {
            let missing = existing
                .solution
                .as_deref()
                .is_none_or(|s| s.trim().is_empty());
            if missing {
                let solution = self.resolve_solution(date)?;
                match self
                    .repo
                    .save(ChangeSet::new().set_solution(existing.id, solution.clone()))
                {
                    Ok(()) => {
                        info!(%date, "assigned solution to existing puzzle");
                        existing.solution = Some(solution);
                    }
                    Err(err) if err.is_conflict() => {
                        debug!(%date, "solution assigned concurrently, re-reading");
                        existing = self
                            .repo
                            .puzzle_by_date(date)?
                            .ok_or(GameError::Repository(err))?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            return Ok(existing);
        }

        let puzzle = DailyPuzzle {
            id: PuzzleId::new(),
            puzzle_date: date,
            solution: Some(self.resolve_solution(date)?),
            archived: false,
        };

        match self.repo.save(ChangeSet::new().insert_puzzle(puzzle.clone())) {
            Ok(()) => {
                info!(%date, puzzle_id = %puzzle.id, "created daily puzzle");
                Ok(puzzle)
            }
            Err(err) if err.is_conflict() => {
                debug!(%date, "puzzle created concurrently, re-reading");
                self.repo
                    .puzzle_by_date(date)?
                    .ok_or(GameError::Repository(err))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_solution(&self, date: NaiveDate) -> Result<String> {
        if let Some(provider) = &self.provider {
            let official = provider.solution_for(date).and_then(|word| {
                Word::with_length(&word, self.word_length)
                    .map(|w| w.text().to_string())
                    .map_err(|source| PuzzleSourceError::InvalidWord { date, word, source })
            });
            match official {
                Ok(word) => return Ok(word),
                Err(err) if self.fallback_to_word_list => {
                    warn!(
                        %date,
                        error = %err,
                        "failed to retrieve the official solution; using the word list rotation instead"
                    );
                }
                Err(err) => return Err(GameError::Unavailable(err.to_string())),
            }
        }

        self.selector
            .solution_for(date)
            .map(ToString::to_string)
            .ok_or_else(|| {
                GameError::Unavailable(format!(
                    "no {}-letter words in the solution rotation",
                    self.word_length
                ))
            })
    }
}

impl std::fmt::Debug for DailyPuzzleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPuzzleService")
            .field("rotation_len", &self.selector.len())
            .field("has_provider", &self.provider.is_some())
            .field("fallback_to_word_list", &self.fallback_to_word_list)
            .field("word_length", &self.word_length)
            .finish_non_exhaustive()
    }
}
