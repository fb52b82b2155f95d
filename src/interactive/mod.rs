//! Interactive TUI for playing the daily puzzle

pub mod app;
pub mod rendering;

pub use app::{App, run_tui};
