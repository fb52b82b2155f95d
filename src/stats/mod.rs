//! Player statistics and streaks

mod calculator;
mod filter;
mod service;

pub use calculator::{PlayerStatistics, StatisticsCalculator};
pub use filter::StatisticsFilter;
pub use service::PlayerStatsService;
