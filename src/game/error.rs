//! Errors raised by the gameplay services.

use thiserror::Error;

use crate::core::{LengthMismatch, WordError};
use crate::repository::RepositoryError;

/// Broad category of a [`GameError`], for callers that map errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input; nothing was changed
    Validation,
    /// The request does not fit the attempt's current state
    Conflict,
    /// The puzzle source could not supply a solution
    Unavailable,
    /// Another writer got there first; refetch and retry
    Concurrency,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Unavailable | Self::Concurrency)
    }
}

/// Hard mode rules a guess can break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HardModeViolation {
    #[error("guess must keep revealed letters in their exact positions")]
    MovedCorrectLetter,
    #[error("guess must include all revealed letters")]
    MissingRevealedLetter,
}

/// Reasons a guess is rejected before it is scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error("guess is not in the word list")]
    UnknownWord,
    #[error(transparent)]
    HardMode(#[from] HardModeViolation),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("puzzle already completed for today")]
    AlreadyCompleted,

    #[error("no guesses remaining")]
    NoGuessesRemaining,

    #[error("no attempt has been started for today's puzzle")]
    NoAttempt,

    #[error("the solution has been revealed and late play is disabled")]
    LatePlayClosed,

    #[error("puzzle source unavailable: {0}")]
    Unavailable(String),

    #[error("the attempt was changed by another request; reload and try again")]
    ConcurrentUpdate,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl GameError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::AlreadyCompleted
            | Self::NoGuessesRemaining
            | Self::NoAttempt
            | Self::LatePlayClosed => ErrorKind::Conflict,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::ConcurrentUpdate => ErrorKind::Concurrency,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Map a failed save, turning lost races into `ConcurrentUpdate`
    pub(crate) fn from_save(err: RepositoryError) -> Self {
        if err.is_conflict() {
            Self::ConcurrentUpdate
        } else {
            Self::Repository(err)
        }
    }
}

impl From<WordError> for GameError {
    fn from(err: WordError) -> Self {
        Self::Validation(ValidationError::Word(err))
    }
}

/// A guess scored against a solution of another length is a malformed guess
impl From<LengthMismatch> for GameError {
    fn from(err: LengthMismatch) -> Self {
        WordError::InvalidLength {
            expected: err.solution,
            actual: err.guess,
        }
        .into()
    }
}

impl From<HardModeViolation> for GameError {
    fn from(err: HardModeViolation) -> Self {
        Self::Validation(ValidationError::HardMode(err))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_is_a_validation_error() {
        let err = GameError::from(LengthMismatch {
            guess: 6,
            solution: 5,
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "guess must be 5 letters long");
    }

    #[test]
    fn kinds_and_retryability() {
        assert_eq!(
            GameError::from(WordError::Empty).kind(),
            ErrorKind::Validation
        );
        assert_eq!(GameError::NoGuessesRemaining.kind(), ErrorKind::Conflict);
        assert!(GameError::ConcurrentUpdate.is_retryable());
        assert!(GameError::Unavailable("offline".into()).is_retryable());
        assert!(!GameError::AlreadyCompleted.is_retryable());
    }

    #[test]
    fn messages_pass_through_validation() {
        assert_eq!(
            GameError::from(HardModeViolation::MissingRevealedLetter).to_string(),
            "guess must include all revealed letters"
        );
        assert_eq!(
            GameError::from(WordError::InvalidLength {
                expected: 5,
                actual: 3
            })
            .to_string(),
            "guess must be 5 letters long"
        );
    }

    #[test]
    fn save_conflicts_become_concurrent_updates() {
        let err = GameError::from_save(RepositoryError::Conflict("stale".into()));
        assert!(matches!(err, GameError::ConcurrentUpdate));
        let err = GameError::from_save(RepositoryError::LockPoisoned);
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
