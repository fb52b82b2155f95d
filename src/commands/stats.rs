//! Player statistics command

use anyhow::Result;

use super::GameContext;
use crate::output::print_statistics;
use crate::stats::{PlayerStatistics, StatisticsFilter};

/// Statistics together with what is needed to present them
#[derive(Debug, Clone)]
pub struct StatisticsReport {
    pub player_name: String,
    pub max_guesses: u32,
    pub statistics: PlayerStatistics,
}

/// Compute the player's statistics
///
/// # Errors
///
/// Returns an error if the player's history cannot be read.
pub fn player_statistics(ctx: &GameContext, filter: &StatisticsFilter) -> Result<StatisticsReport> {
    let statistics = ctx.stats.statistics(ctx.player_id, filter)?;
    Ok(StatisticsReport {
        player_name: ctx.player_name.clone(),
        max_guesses: ctx.options.max_guesses,
        statistics,
    })
}

/// Compute and print the player's statistics
///
/// # Errors
///
/// Returns an error if the player's history cannot be read.
pub fn show_statistics(ctx: &GameContext, filter: &StatisticsFilter) -> Result<StatisticsReport> {
    let report = player_statistics(ctx, filter)?;
    print_statistics(&report);
    Ok(report)
}
