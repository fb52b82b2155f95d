//! The daily game for one player
//!
//! Per (player, puzzle) pair an attempt moves `NoAttempt -> InProgress ->
//! {Solved, Failed}`. Every accepted guess, together with any status change and
//! the lazily created attempt, is saved as one change set.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    DailyPuzzleService, GameClock, GameError, HardModeConstraints, Result, ValidationError,
};
use crate::config::GameOptions;
use crate::core::{Feedback, Word};
use crate::game::model::{
    AttemptRecord, AttemptStatus, DailyPuzzle, GuessAttempt, GuessId, PlayerId,
    PlayerPuzzleAttempt, ScoredGuess,
};
use crate::repository::{ChangeSet, GameRepository};
use crate::wordlists::WordValidator;

/// What a player sees for today's puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameplayState {
    pub puzzle: DailyPuzzle,
    pub attempt: Option<AttemptRecord>,
    pub cutoff_passed: bool,
    /// Cutoff passed or the attempt is finished
    pub solution_revealed: bool,
    pub allow_late_play: bool,
    pub word_length: usize,
    pub max_guesses: u32,
    /// The attempt's mode, or the default mode when no attempt exists yet
    pub is_hard_mode: bool,
}

impl GameplayState {
    #[must_use]
    pub fn status(&self) -> Option<AttemptStatus> {
        self.attempt.as_ref().map(|record| record.attempt.status)
    }

    #[must_use]
    pub fn guesses(&self) -> &[ScoredGuess] {
        self.attempt
            .as_ref()
            .map(|record| record.guesses.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> u32 {
        let used = self.attempt.as_ref().map_or(0, AttemptRecord::guess_count);
        self.max_guesses.saturating_sub(used)
    }

    /// Whether another guess would be accepted, ignoring the guess itself
    #[must_use]
    pub fn can_guess(&self) -> bool {
        match &self.attempt {
            Some(record) => {
                !record.attempt.status.is_terminal() && record.guess_count() < self.max_guesses
            }
            None => self.allow_late_play || !self.cutoff_passed,
        }
    }

    /// The solution, once it may be shown to this player
    #[must_use]
    pub fn visible_solution(&self) -> Option<&str> {
        if self.solution_revealed {
            self.puzzle.solution.as_deref()
        } else {
            None
        }
    }
}

/// Every attempt at today's puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionsSnapshot {
    pub puzzle: DailyPuzzle,
    pub cutoff_passed: bool,
    pub attempts: Vec<AttemptRecord>,
}

impl SolutionsSnapshot {
    /// The solution, only once the cutoff has passed
    #[must_use]
    pub fn disclosed_solution(&self) -> Option<&str> {
        if self.cutoff_passed {
            self.puzzle.solution.as_deref()
        } else {
            None
        }
    }
}

/// Runs guesses against today's puzzle
#[derive(Clone)]
pub struct GameplayService {
    repo: Arc<dyn GameRepository>,
    puzzles: DailyPuzzleService,
    clock: GameClock,
    options: GameOptions,
    validator: Option<Arc<dyn WordValidator>>,
}

impl GameplayService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn GameRepository>,
        puzzles: DailyPuzzleService,
        clock: GameClock,
        options: GameOptions,
    ) -> Self {
        Self {
            repo,
            puzzles,
            clock,
            options,
            validator: None,
        }
    }

    /// Reject guesses the validator does not recognize
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn WordValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    #[must_use]
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Today's puzzle and the player's attempt, if any
    ///
    /// # Errors
    ///
    /// Fails if the puzzle cannot be created or storage fails.
    pub fn get_state(&self, player_id: PlayerId) -> Result<GameplayState> {
        let puzzle = self.todays_puzzle()?;
        let attempt = self.repo.attempt(player_id, puzzle.id)?;
        Ok(self.state_for(puzzle, attempt))
    }

    /// Score a guess and record it
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed, unknown, or hard-mode breaking guesses
    /// - `AlreadyCompleted` once the attempt is solved or failed
    /// - `NoGuessesRemaining` if the attempt is full (it is marked failed first)
    /// - `LatePlayClosed` when starting after the reveal with late play disabled
    /// - `ConcurrentUpdate` if the attempt changed since it was read
    pub fn submit_guess(&self, player_id: PlayerId, guess: &str) -> Result<GameplayState> {
        let word = Word::with_length(guess, self.options.word_length)?;
        if let Some(validator) = &self.validator {
            if !validator.is_valid_word(&word) {
                debug!(guess = %word, "rejected unknown word");
                return Err(ValidationError::UnknownWord.into());
            }
        }

        let puzzle = self.todays_puzzle()?;
        let solution = self.solution_word(&puzzle)?;
        let now = self.clock.now();

        let (mut record, is_new) = match self.repo.attempt(player_id, puzzle.id)? {
            Some(record) => (record, false),
            None => {
                if !self.options.allow_late_play && self.clock.has_reveal_passed(puzzle.puzzle_date) {
                    return Err(GameError::LatePlayClosed);
                }
                let attempt = PlayerPuzzleAttempt::start(
                    player_id,
                    puzzle.id,
                    now,
                    self.options.hard_mode_by_default,
                );
                (AttemptRecord::new(attempt), true)
            }
        };

        if record.attempt.status.is_terminal() {
            return Err(GameError::AlreadyCompleted);
        }

        if record.guess_count() >= self.options.max_guesses {
            record.attempt.complete(AttemptStatus::Failed, now);
            let changes = if is_new {
                ChangeSet::new().insert_attempt(record.attempt.clone())
            } else {
                ChangeSet::new().update_attempt(record.attempt.clone())
            };
            self.repo.save(changes).map_err(GameError::from_save)?;
            warn!(attempt_id = %record.attempt.id, "attempt out of guesses, marked failed");
            return Err(GameError::NoGuessesRemaining);
        }

        if record.attempt.hard_mode && !record.guesses.is_empty() {
            HardModeConstraints::from_feedback(record.guesses.iter().map(|g| &g.feedback))
                .check(&word)?;
        }

        let feedback = Feedback::calculate(&word, &solution)?;
        let solved = feedback.is_solved();
        let scored = ScoredGuess {
            guess: GuessAttempt {
                id: GuessId::new(),
                attempt_id: record.attempt.id,
                guess_number: record.guess_count() + 1,
                word: word.text().to_string(),
            },
            feedback,
        };
        record.guesses.push(scored.clone());

        if solved {
            record.attempt.complete(AttemptStatus::Solved, now);
        } else if record.guess_count() >= self.options.max_guesses {
            record.attempt.complete(AttemptStatus::Failed, now);
        }

        let changes = if is_new {
            ChangeSet::new().insert_attempt(record.attempt.clone())
        } else {
            ChangeSet::new().update_attempt(record.attempt.clone())
        };
        if let Err(err) = self.repo.save(changes.add_guess(scored)) {
            warn!(attempt_id = %record.attempt.id, error = %err, "failed to save guess");
            return Err(GameError::from_save(err));
        }

        info!(
            player_id = %player_id,
            puzzle_date = %puzzle.puzzle_date,
            guess_number = record.guess_count(),
            status = %record.attempt.status,
            "guess recorded"
        );

        let stored = self.repo.attempt(player_id, puzzle.id)?;
        Ok(self.state_for(puzzle, stored))
    }

    /// Turn hard mode off for the player's current attempt; there is no way back
    ///
    /// # Errors
    ///
    /// `NoAttempt` before the first guess, `AlreadyCompleted` once finished, and
    /// `ConcurrentUpdate` if the attempt changed since it was read.
    pub fn enable_easy_mode(&self, player_id: PlayerId) -> Result<GameplayState> {
        let puzzle = self.todays_puzzle()?;
        let mut record = self
            .repo
            .attempt(player_id, puzzle.id)?
            .ok_or(GameError::NoAttempt)?;

        if record.attempt.status.is_terminal() {
            return Err(GameError::AlreadyCompleted);
        }
        if !record.attempt.hard_mode {
            return Ok(self.state_for(puzzle, Some(record)));
        }

        record.attempt.hard_mode = false;
        self.repo
            .save(ChangeSet::new().update_attempt(record.attempt.clone()))
            .map_err(GameError::from_save)?;
        info!(attempt_id = %record.attempt.id, "switched to easy mode");

        let stored = self.repo.attempt(player_id, puzzle.id)?;
        Ok(self.state_for(puzzle, stored))
    }

    /// All attempts at today's puzzle
    ///
    /// Callers decide what to show; see [`SolutionsSnapshot::disclosed_solution`].
    ///
    /// # Errors
    ///
    /// Fails if the puzzle cannot be created or storage fails.
    pub fn get_solutions(&self) -> Result<SolutionsSnapshot> {
        let puzzle = self.todays_puzzle()?;
        let attempts = self.repo.attempts_for_puzzle(puzzle.id)?;
        Ok(SolutionsSnapshot {
            cutoff_passed: self.clock.has_reveal_passed(puzzle.puzzle_date),
            puzzle,
            attempts,
        })
    }

    fn todays_puzzle(&self) -> Result<DailyPuzzle> {
        self.puzzles.get_or_create_puzzle(self.clock.today())
    }

    fn solution_word(&self, puzzle: &DailyPuzzle) -> Result<Word> {
        let text = puzzle.solution.as_deref().unwrap_or_default();
        Word::with_length(text, self.options.word_length).map_err(|err| {
            GameError::Unavailable(format!(
                "stored solution for {} is unusable: {err}",
                puzzle.puzzle_date
            ))
        })
    }

    fn state_for(&self, puzzle: DailyPuzzle, attempt: Option<AttemptRecord>) -> GameplayState {
        let cutoff_passed = self.clock.has_reveal_passed(puzzle.puzzle_date);
        let terminal = attempt
            .as_ref()
            .is_some_and(|record| record.attempt.status.is_terminal());
        let is_hard_mode = attempt
            .as_ref()
            .map_or(self.options.hard_mode_by_default, |record| record.attempt.hard_mode);

        GameplayState {
            puzzle,
            attempt,
            cutoff_passed,
            solution_revealed: cutoff_passed || terminal,
            allow_late_play: self.options.allow_late_play,
            word_length: self.options.word_length,
            max_guesses: self.options.max_guesses,
            is_hard_mode,
        }
    }
}

impl std::fmt::Debug for GameplayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameplayService")
            .field("puzzles", &self.puzzles)
            .field("clock", &self.clock)
            .field("options", &self.options)
            .field("validates_words", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LetterResult, WordError};
    use crate::game::{ClockZone, ErrorKind, HardModeViolation, ManualTimeSource, WordSelector};
    use crate::game::model::PuzzleId;
    use crate::repository::{InMemoryGameRepository, RepositoryError};
    use crate::wordlists::WordListValidator;
    use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

    struct Harness {
        repo: Arc<InMemoryGameRepository>,
        source: Arc<ManualTimeSource>,
        service: GameplayService,
        player: PlayerId,
    }

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn seed_puzzle(repo: &InMemoryGameRepository, solution: &str) {
        repo.save(ChangeSet::new().insert_puzzle(DailyPuzzle {
            id: PuzzleId::new(),
            puzzle_date: today(),
            solution: Some(solution.to_string()),
            archived: false,
        }))
        .unwrap();
    }

    fn harness_with(options: GameOptions) -> Harness {
        let repo = Arc::new(InMemoryGameRepository::new());
        seed_puzzle(&repo, "APPLE");
        let source = Arc::new(ManualTimeSource::new(morning()));
        let clock = GameClock::new(
            source.clone(),
            ClockZone::Fixed(FixedOffset::east_opt(0).unwrap()),
            options.reveal_hour_local,
        );
        let puzzles = DailyPuzzleService::new(repo.clone(), WordSelector::embedded(5), 5);
        let service = GameplayService::new(repo.clone(), puzzles, clock, options);
        Harness {
            repo,
            source,
            service,
            player: PlayerId::from_name("alice"),
        }
    }

    fn harness() -> Harness {
        harness_with(GameOptions::default())
    }

    fn easy_options() -> GameOptions {
        GameOptions {
            hard_mode_by_default: false,
            ..GameOptions::default()
        }
    }

    #[test]
    fn fresh_state_has_no_attempt() {
        let h = harness();
        let state = h.service.get_state(h.player).unwrap();

        assert!(state.attempt.is_none());
        assert!(!state.cutoff_passed);
        assert!(!state.solution_revealed);
        assert!(state.is_hard_mode);
        assert!(state.can_guess());
        assert_eq!(state.remaining_guesses(), 6);
        assert_eq!(state.visible_solution(), None);
        assert_eq!(h.repo.attempt_count().unwrap(), 0);
    }

    #[test]
    fn first_guess_creates_the_attempt() {
        let h = harness();
        let state = h.service.submit_guess(h.player, " alley ").unwrap();

        let record = state.attempt.as_ref().unwrap();
        assert_eq!(record.attempt.status, AttemptStatus::InProgress);
        assert!(record.attempt.hard_mode);
        assert_eq!(record.attempt.created_on, morning());
        assert_eq!(record.guesses[0].guess.word, "ALLEY");
        assert_eq!(
            record.guesses[0].feedback.results(),
            vec![
                LetterResult::Correct,
                LetterResult::Present,
                LetterResult::Absent,
                LetterResult::Present,
                LetterResult::Absent,
            ]
        );
        assert_eq!(state.remaining_guesses(), 5);
    }

    #[test]
    fn solving_finishes_the_attempt_and_reveals() {
        let h = harness();
        h.service.submit_guess(h.player, "ALLEY").unwrap();
        let state = h.service.submit_guess(h.player, "apple").unwrap();

        assert_eq!(state.status(), Some(AttemptStatus::Solved));
        assert!(state.solution_revealed);
        assert!(!state.can_guess());
        assert_eq!(state.visible_solution(), Some("APPLE"));
        let record = state.attempt.as_ref().unwrap();
        assert_eq!(record.attempt.completed_on, Some(morning()));

        let err = h.service.submit_guess(h.player, "APPLE").unwrap_err();
        assert!(matches!(err, GameError::AlreadyCompleted));
        assert_eq!(err.to_string(), "puzzle already completed for today");
    }

    #[test]
    fn six_misses_fail_and_a_seventh_is_a_conflict() {
        let h = harness_with(easy_options());
        for (i, guess) in ["CRANE", "SLATE", "BRICK", "STORM", "GHOST", "FROND"]
            .into_iter()
            .enumerate()
        {
            let state = h.service.submit_guess(h.player, guess).unwrap();
            let expected = if i == 5 {
                AttemptStatus::Failed
            } else {
                AttemptStatus::InProgress
            };
            assert_eq!(state.status(), Some(expected));
        }

        let err = h.service.submit_guess(h.player, "QUIET").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(h.repo.guess_count().unwrap(), 6);

        let state = h.service.get_state(h.player).unwrap();
        assert!(state.solution_revealed);
        assert_eq!(state.remaining_guesses(), 0);
    }

    #[test]
    fn full_attempt_is_marked_failed_when_guessed_again() {
        let h = harness_with(easy_options());
        for guess in ["CRANE", "SLATE", "BRICK"] {
            h.service.submit_guess(h.player, guess).unwrap();
        }

        // Same store, stricter limit
        let shorter = GameOptions {
            max_guesses: 3,
            ..easy_options()
        };
        let strict = GameplayService::new(
            h.repo.clone(),
            DailyPuzzleService::new(h.repo.clone(), WordSelector::embedded(5), 5),
            h.service.clock().clone(),
            shorter,
        );

        let err = strict.submit_guess(h.player, "GHOST").unwrap_err();
        assert!(matches!(err, GameError::NoGuessesRemaining));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let state = strict.get_state(h.player).unwrap();
        assert_eq!(state.status(), Some(AttemptStatus::Failed));
        assert_eq!(state.guesses().len(), 3);
    }

    #[test]
    fn hard_mode_rejects_paste_after_alley() {
        let h = harness();
        h.service.submit_guess(h.player, "ALLEY").unwrap();

        let err = h.service.submit_guess(h.player, "PASTE").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::HardMode(
                HardModeViolation::MovedCorrectLetter
            ))
        ));
        assert_eq!(h.repo.guess_count().unwrap(), 1);
    }

    #[test]
    fn easy_mode_allows_paste_after_alley() {
        let h = harness();
        h.service.submit_guess(h.player, "ALLEY").unwrap();

        let state = h.service.enable_easy_mode(h.player).unwrap();
        assert!(!state.is_hard_mode);

        let state = h.service.submit_guess(h.player, "PASTE").unwrap();
        assert_eq!(state.guesses().len(), 2);
        assert_eq!(state.status(), Some(AttemptStatus::InProgress));

        // Already easy: no-op
        let again = h.service.enable_easy_mode(h.player).unwrap();
        assert!(!again.is_hard_mode);
        assert_eq!(again.attempt.unwrap().attempt.version, 3);
    }

    #[test]
    fn easy_mode_needs_an_open_attempt() {
        let h = harness();
        assert!(matches!(
            h.service.enable_easy_mode(h.player),
            Err(GameError::NoAttempt)
        ));

        h.service.submit_guess(h.player, "APPLE").unwrap();
        assert!(matches!(
            h.service.enable_easy_mode(h.player),
            Err(GameError::AlreadyCompleted)
        ));
    }

    #[test]
    fn malformed_guesses_change_nothing() {
        let h = harness();
        for guess in ["", "   ", "APP", "APPLES", "AP1LE"] {
            let err = h.service.submit_guess(h.player, guess).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "guess {guess:?}");
        }
        assert_eq!(
            h.service.submit_guess(h.player, "").unwrap_err().to_string(),
            "guess cannot be empty"
        );
        assert_eq!(h.repo.attempt_count().unwrap(), 0);
        assert_eq!(h.repo.guess_count().unwrap(), 0);
    }

    #[test]
    fn guess_that_grows_when_uppercased_is_a_validation_error() {
        let h = harness();
        let err = h.service.submit_guess(h.player, "maßen").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::Word(WordError::InvalidLength {
                expected: 5,
                actual: 6
            }))
        ));
        assert_eq!(h.repo.attempt_count().unwrap(), 0);
    }

    #[test]
    fn dictionary_rejects_unknown_words() {
        let h = harness();
        let service = h
            .service
            .clone()
            .with_validator(Arc::new(WordListValidator::embedded(5)));

        let err = service.submit_guess(h.player, "QXZQV").unwrap_err();
        assert!(matches!(
            err,
            GameError::Validation(ValidationError::UnknownWord)
        ));
        assert_eq!(h.repo.attempt_count().unwrap(), 0);

        assert!(service.submit_guess(h.player, "ALLEY").is_ok());
    }

    #[test]
    fn players_are_independent() {
        let h = harness();
        let bob = PlayerId::from_name("bob");
        h.service.submit_guess(h.player, "APPLE").unwrap();

        let state = h.service.get_state(bob).unwrap();
        assert!(state.attempt.is_none());
        assert!(state.can_guess());
        assert!(!state.solution_revealed);
    }

    #[test]
    fn cutoff_reveals_the_solution() {
        let h = harness();
        h.source.advance(Duration::hours(4));

        let state = h.service.get_state(h.player).unwrap();
        assert!(state.cutoff_passed);
        assert_eq!(state.visible_solution(), Some("APPLE"));
        assert!(state.can_guess());
    }

    #[test]
    fn late_play_can_be_disabled() {
        let h = harness_with(GameOptions {
            allow_late_play: false,
            ..GameOptions::default()
        });
        h.service.submit_guess(h.player, "ALLEY").unwrap();
        h.source.advance(Duration::hours(5));

        // An attempt started before the reveal may continue
        assert!(h.service.submit_guess(h.player, "APPLE").is_ok());

        let late = PlayerId::from_name("carol");
        assert!(!h.service.get_state(late).unwrap().can_guess());
        assert!(matches!(
            h.service.submit_guess(late, "APPLE"),
            Err(GameError::LatePlayClosed)
        ));
    }

    #[test]
    fn solutions_are_disclosed_after_cutoff() {
        let h = harness();
        h.service.submit_guess(h.player, "ALLEY").unwrap();
        h.service
            .submit_guess(PlayerId::from_name("bob"), "APPLE")
            .unwrap();

        let before = h.service.get_solutions().unwrap();
        assert_eq!(before.attempts.len(), 2);
        assert_eq!(before.disclosed_solution(), None);

        h.source.set(Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap());
        let after = h.service.get_solutions().unwrap();
        assert_eq!(after.disclosed_solution(), Some("APPLE"));
    }

    #[test]
    fn new_day_gets_a_new_puzzle() {
        let h = harness();
        h.service.submit_guess(h.player, "APPLE").unwrap();
        h.source.advance(Duration::days(1));

        let state = h.service.get_state(h.player).unwrap();
        assert_eq!(state.puzzle.puzzle_date, today() + Duration::days(1));
        assert!(state.attempt.is_none());
        // 2025-01-11 in the rotation
        assert_eq!(state.puzzle.solution.as_deref(), Some("TRAIL"));
    }

    /// Accepts reads, loses every write race
    struct ConflictingRepository {
        inner: Arc<InMemoryGameRepository>,
    }

    impl GameRepository for ConflictingRepository {
        fn puzzle_by_date(
            &self,
            date: NaiveDate,
        ) -> crate::repository::Result<Option<DailyPuzzle>> {
            self.inner.puzzle_by_date(date)
        }

        fn attempt(
            &self,
            player_id: PlayerId,
            puzzle_id: PuzzleId,
        ) -> crate::repository::Result<Option<AttemptRecord>> {
            self.inner.attempt(player_id, puzzle_id)
        }

        fn attempts_for_puzzle(
            &self,
            puzzle_id: PuzzleId,
        ) -> crate::repository::Result<Vec<AttemptRecord>> {
            self.inner.attempts_for_puzzle(puzzle_id)
        }

        fn attempts_for_player(
            &self,
            player_id: PlayerId,
        ) -> crate::repository::Result<Vec<crate::game::model::AttemptHistoryEntry>> {
            self.inner.attempts_for_player(player_id)
        }

        fn save(&self, _changes: ChangeSet) -> crate::repository::Result<()> {
            Err(RepositoryError::Conflict("attempt was modified".to_string()))
        }
    }

    #[test]
    fn lost_write_race_is_a_concurrent_update() {
        let h = harness();
        let racing: Arc<dyn GameRepository> = Arc::new(ConflictingRepository {
            inner: h.repo.clone(),
        });
        let service = GameplayService::new(
            racing.clone(),
            DailyPuzzleService::new(racing, WordSelector::embedded(5), 5),
            h.service.clock().clone(),
            GameOptions::default(),
        );

        let err = service.submit_guess(h.player, "ALLEY").unwrap_err();
        assert!(matches!(err, GameError::ConcurrentUpdate));
        assert_eq!(err.kind(), ErrorKind::Concurrency);
        assert!(err.is_retryable());
        assert_eq!(h.repo.attempt_count().unwrap(), 0);
    }

    #[test]
    fn stale_attempt_write_is_a_concurrent_update() {
        let h = harness();
        h.service.submit_guess(h.player, "ALLEY").unwrap();
        let puzzle = h.repo.puzzle_by_date(today()).unwrap().unwrap();
        let stale = h.repo.attempt(h.player, puzzle.id).unwrap().unwrap();

        h.service.submit_guess(h.player, "ANKLE").unwrap();

        let mut outdated = stale.attempt.clone();
        outdated.hard_mode = false;
        let err = h
            .repo
            .save(ChangeSet::new().update_attempt(outdated))
            .unwrap_err();
        assert!(matches!(
            GameError::from_save(err),
            GameError::ConcurrentUpdate
        ));
        assert!(h.service.get_state(h.player).unwrap().is_hard_mode);
    }
}
