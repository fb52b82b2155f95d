//! Word lists for the daily puzzle
//!
//! Provides the embedded dictionary and solution rotation, file loading, and the
//! dictionary-backed guess validator.

mod embedded;
pub mod loader;
mod validator;

pub use embedded::{ALLOWED, ALLOWED_COUNT, SOLUTIONS, SOLUTIONS_COUNT};
pub use validator::{WordListValidator, WordValidator};
