//! Persistence for puzzles and attempts
//!
//! - [`GameRepository`]: the storage contract used by the game services
//! - [`InMemoryGameRepository`]: lock-guarded tables in memory
//! - [`JsonFileRepository`]: the same tables persisted to a JSON file

mod error;
mod file;
mod memory;
mod tables;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::JsonFileRepository;
pub use memory::InMemoryGameRepository;
pub use traits::{AttemptWrite, ChangeSet, GameRepository};
