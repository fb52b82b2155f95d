//! Daily puzzle gameplay
//!
//! - [`GameClock`]: reveal instant and cutoff checks
//! - [`HardModeConstraints`]: rules carried from earlier guesses
//! - [`DailyPuzzleService`]: finds or creates the day's puzzle
//! - [`GameplayService`]: the attempt state machine

mod clock;
mod error;
mod gameplay;
mod hard_mode;
pub mod model;
mod puzzle;

pub use clock::{ClockZone, GameClock, ManualTimeSource, SystemTimeSource, TimeSource};
pub use error::{ErrorKind, GameError, HardModeViolation, Result, ValidationError};
pub use gameplay::{GameplayService, GameplayState, SolutionsSnapshot};
pub use hard_mode::HardModeConstraints;
pub use puzzle::{
    DailyPuzzleService, OfficialWordProvider, PuzzleSourceError, ScheduleFileProvider,
    WordSelector,
};
