//! Formatting utilities for terminal output

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};

use crate::core::{Feedback, LetterResult};
use crate::game::model::AttemptStatus;

/// A single board tile, colored like the game
#[must_use]
pub fn tile(letter: char, result: LetterResult) -> ColoredString {
    let text = format!(" {letter} ");
    match result {
        LetterResult::Correct => text.black().on_green().bold(),
        LetterResult::Present => text.black().on_yellow().bold(),
        LetterResult::Absent => text.white().on_bright_black().bold(),
    }
}

/// A scored guess as a row of tiles
#[must_use]
pub fn feedback_tiles(feedback: &Feedback) -> String {
    feedback
        .marks()
        .iter()
        .map(|mark| tile(mark.letter, mark.result).to_string())
        .collect()
}

/// An unplayed row
#[must_use]
pub fn empty_row(word_length: usize) -> String {
    " · ".repeat(word_length).bright_black().to_string()
}

#[must_use]
pub fn status_label(status: AttemptStatus) -> ColoredString {
    match status {
        AttemptStatus::InProgress => "in progress".yellow(),
        AttemptStatus::Solved => "solved".green().bold(),
        AttemptStatus::Failed => "failed".red().bold(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Time left until `target`, as "2h 05m"; "now" once it has passed
#[must_use]
pub fn format_countdown(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    let remaining = target - now;
    if remaining.num_seconds() <= 0 {
        return "now".to_string();
    }
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() - hours * 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{}m", minutes.max(1))
    }
}
