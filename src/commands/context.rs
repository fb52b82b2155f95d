//! Wiring for the command line
//!
//! Builds the repository, clock, puzzle source and services from the global
//! flags and the optional config file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info};

use crate::config::GameOptions;
use crate::game::model::PlayerId;
use crate::game::{
    ClockZone, DailyPuzzleService, GameClock, GameplayService, ManualTimeSource,
    ScheduleFileProvider, SystemTimeSource, TimeSource, WordSelector,
};
use crate::repository::{GameRepository, JsonFileRepository};
use crate::stats::PlayerStatsService;
use crate::wordlists::{WordListValidator, WordValidator};

/// Global command line settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub player: String,
    pub store: PathBuf,
    pub config: Option<PathBuf>,
    /// Pin the clock; its offset also becomes the game's time zone
    pub now: Option<DateTime<FixedOffset>>,
    pub no_dictionary: bool,
}

/// Everything a command needs to run
#[derive(Debug, Clone)]
pub struct GameContext {
    pub player_name: String,
    pub player_id: PlayerId,
    pub options: GameOptions,
    pub gameplay: GameplayService,
    pub stats: PlayerStatsService,
}

impl GameContext {
    /// Build services from settings
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or dictionary cannot be loaded.
    pub fn build(settings: &Settings) -> Result<Self> {
        let mut options = match &settings.config {
            Some(path) => GameOptions::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GameOptions::default(),
        };
        if settings.no_dictionary {
            options.validate_words = false;
        }

        let repo: Arc<dyn GameRepository> = Arc::new(JsonFileRepository::new(&settings.store));
        debug!(store = %settings.store.display(), "opened store");

        Self::with_repository(settings, options, repo)
    }

    /// Build services over an existing repository
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary file cannot be loaded.
    pub fn with_repository(
        settings: &Settings,
        options: GameOptions,
        repo: Arc<dyn GameRepository>,
    ) -> Result<Self> {
        let (source, zone): (Arc<dyn TimeSource>, ClockZone) = match settings.now {
            Some(now) => {
                info!(%now, "clock pinned");
                (
                    Arc::new(ManualTimeSource::new(now.with_timezone(&Utc))),
                    ClockZone::Fixed(*now.offset()),
                )
            }
            None => (Arc::new(SystemTimeSource), ClockZone::Local),
        };
        let clock = GameClock::new(source, zone, options.reveal_hour_local);

        let mut puzzles = DailyPuzzleService::new(
            repo.clone(),
            WordSelector::embedded(options.word_length),
            options.word_length,
        );
        if let Some(path) = &options.schedule_path {
            puzzles = puzzles.with_provider(
                Arc::new(ScheduleFileProvider::new(path)),
                options.fallback_to_word_list,
            );
        }

        let mut gameplay =
            GameplayService::new(repo.clone(), puzzles, clock.clone(), options.clone());
        if options.validate_words {
            let validator = match &options.dictionary_path {
                Some(path) => WordListValidator::from_file(path, options.word_length)
                    .with_context(|| format!("loading dictionary {}", path.display()))?,
                None => WordListValidator::embedded(options.word_length),
            };
            debug!(words = validator.len(), "dictionary loaded");
            let validator: Arc<dyn WordValidator> = Arc::new(validator);
            gameplay = gameplay.with_validator(validator);
        }

        Ok(Self {
            player_name: settings.player.trim().to_string(),
            player_id: PlayerId::from_name(&settings.player),
            options,
            gameplay,
            stats: PlayerStatsService::new(repo, clock),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::repository::InMemoryGameRepository;

    /// 2025-01-10 08:00 at +00:00; the rotation word for that day is ROAST
    pub fn context() -> GameContext {
        let settings = Settings {
            player: "tester".to_string(),
            store: PathBuf::from("unused.json"),
            config: None,
            now: DateTime::parse_from_rfc3339("2025-01-10T08:00:00+00:00").ok(),
            no_dictionary: false,
        };
        GameContext::with_repository(
            &settings,
            GameOptions::default(),
            Arc::new(InMemoryGameRepository::new()),
        )
        .unwrap()
    }
}
