//! Command implementations

pub mod context;
pub mod daily;
pub mod evaluate;
pub mod simple;
pub mod stats;

pub use context::{GameContext, Settings};
pub use daily::{enable_easy_mode, show_solutions, show_state, submit_guess};
pub use evaluate::{EvaluationResult, evaluate};
pub use simple::{run_simple, run_simple_with};
pub use stats::{StatisticsReport, player_statistics, show_statistics};
