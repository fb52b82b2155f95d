//! Daily reveal time and cutoff checks
//!
//! Each puzzle's solution becomes public at a configured local hour on the
//! puzzle's date. Attempts created before that instant are competitive; anything
//! created later is practice.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::game::model::PlayerPuzzleAttempt;

/// Where the current time comes from
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Time zone used for calendar dates and the reveal hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockZone {
    /// The system's local zone
    Local,
    Fixed(FixedOffset),
}

impl ClockZone {
    fn local_date(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }

    /// Resolve a wall-clock time to an instant
    ///
    /// Ambiguous times resolve to the earlier instant. A time skipped by a DST
    /// transition has no instant, and is read as UTC.
    fn to_utc(self, wall: NaiveDateTime) -> DateTime<Utc> {
        let resolved = match self {
            Self::Local => Local
                .from_local_datetime(&wall)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(&wall)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
        };
        resolved.unwrap_or_else(|| wall.and_utc())
    }
}

/// Clock for the daily game
#[derive(Clone)]
pub struct GameClock {
    source: Arc<dyn TimeSource>,
    zone: ClockZone,
    reveal_time: NaiveTime,
}

impl GameClock {
    /// `reveal_hour` is clamped to 0..=23
    #[must_use]
    pub fn new(source: Arc<dyn TimeSource>, zone: ClockZone, reveal_hour: u32) -> Self {
        let reveal_time = NaiveTime::from_hms_opt(reveal_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        Self {
            source,
            zone,
            reveal_time,
        }
    }

    /// System clock in the system's local zone
    #[must_use]
    pub fn system(reveal_hour: u32) -> Self {
        Self::new(Arc::new(SystemTimeSource), ClockZone::Local, reveal_hour)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.source.now()
    }

    /// Local calendar date right now
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.zone.local_date(self.now())
    }

    #[must_use]
    pub const fn zone(&self) -> ClockZone {
        self.zone
    }

    #[must_use]
    pub fn reveal_instant(&self, puzzle_date: NaiveDate) -> DateTime<Utc> {
        self.zone.to_utc(puzzle_date.and_time(self.reveal_time))
    }

    #[must_use]
    pub fn has_reveal_passed(&self, puzzle_date: NaiveDate) -> bool {
        self.now() >= self.reveal_instant(puzzle_date)
    }

    /// Whether the attempt was started once the solution was already public
    #[must_use]
    pub fn is_after_reveal(&self, attempt: &PlayerPuzzleAttempt, puzzle_date: NaiveDate) -> bool {
        attempt.created_on >= self.reveal_instant(puzzle_date)
    }
}

impl std::fmt::Debug for GameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClock")
            .field("now", &self.now())
            .field("zone", &self.zone)
            .field("reveal_time", &self.reveal_time)
            .finish()
    }
}
