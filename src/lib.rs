//! Wordle Tracker
//!
//! A daily Wordle game engine: guess scoring, hard mode, the reveal cutoff,
//! attempt lifecycle, and streak statistics, with storage behind a trait.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_tracker::core::{Feedback, LetterResult, Word};
//!
//! let guess = Word::new("alley").unwrap();
//! let solution = Word::new("apple").unwrap();
//!
//! let feedback = Feedback::calculate(&guess, &solution).unwrap();
//! assert_eq!(feedback.to_emoji(), "🟩🟨⬜🟨⬜");
//! assert_eq!(feedback.results()[0], LetterResult::Correct);
//! ```

// Core domain types
pub mod core;

// Word lists and dictionary validation
pub mod wordlists;

// Game configuration
pub mod config;

// Persistence
pub mod repository;

// Gameplay services
pub mod game;

// Player statistics
pub mod stats;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
