//! Statistics for a stored player

use std::sync::Arc;

use tracing::debug;

use super::{PlayerStatistics, StatisticsCalculator, StatisticsFilter};
use crate::game::model::{AttemptHistoryEntry, PlayerId};
use crate::game::{GameClock, Result};
use crate::repository::GameRepository;

/// Loads a player's history and classifies it against the reveal clock
#[derive(Clone)]
pub struct PlayerStatsService {
    repo: Arc<dyn GameRepository>,
    clock: GameClock,
}

impl PlayerStatsService {
    #[must_use]
    pub fn new(repo: Arc<dyn GameRepository>, clock: GameClock) -> Self {
        Self { repo, clock }
    }

    /// # Errors
    ///
    /// Fails if the history cannot be read.
    pub fn history(&self, player_id: PlayerId) -> Result<Vec<AttemptHistoryEntry>> {
        Ok(self.repo.attempts_for_player(player_id)?)
    }

    /// # Errors
    ///
    /// Fails if the history cannot be read.
    pub fn statistics(
        &self,
        player_id: PlayerId,
        filter: &StatisticsFilter,
    ) -> Result<PlayerStatistics> {
        let history = self.history(player_id)?;
        debug!(%player_id, attempts = history.len(), "computing statistics");
        Ok(StatisticsCalculator::calculate(&history, filter, |entry| {
            self.clock.is_after_reveal(&entry.attempt, entry.puzzle_date)
        }))
    }
}

impl std::fmt::Debug for PlayerStatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStatsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
