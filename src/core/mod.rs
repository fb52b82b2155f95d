//! Core domain types for Wordle
//!
//! This module contains the fundamental word and feedback types. Everything here is
//! pure: no clock, no storage, no configuration.

mod feedback;
mod word;

pub use feedback::{Feedback, LengthMismatch, LetterMark, LetterResult};
pub use word::{Word, WordError};
