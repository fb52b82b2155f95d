//! Game configuration
//!
//! Static options for the daily game, loaded from TOML. Every field has a default so
//! a config file only needs to mention what it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Options for the daily puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameOptions {
    /// Hour of the day (local time) when solutions unlock and late plays stop counting
    pub reveal_hour_local: u32,
    pub max_guesses: u32,
    pub word_length: usize,
    /// New attempts start in hard mode; players may drop to easy mode once
    pub hard_mode_by_default: bool,
    /// Whether attempts started after the reveal may still be played
    pub allow_late_play: bool,
    /// Use the built-in solution rotation when the official source fails
    pub fallback_to_word_list: bool,
    /// Reject guesses that are not in the dictionary
    pub validate_words: bool,
    /// Dictionary file replacing the embedded one
    pub dictionary_path: Option<PathBuf>,
    /// JSON schedule of official solutions (`{"YYYY-MM-DD": "WORD"}`)
    pub schedule_path: Option<PathBuf>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            reveal_hour_local: 12,
            max_guesses: 6,
            word_length: 5,
            hard_mode_by_default: true,
            allow_late_play: true,
            fallback_to_word_list: true,
            validate_words: true,
            dictionary_path: None,
            schedule_path: None,
        }
    }
}

impl GameOptions {
    /// Parse options from a TOML string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::Invalid` if the values are out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_hour_local > 23 {
            return Err(ConfigError::Invalid(format!(
                "reveal_hour_local must be between 0 and 23, got {}",
                self.reveal_hour_local
            )));
        }
        if self.max_guesses == 0 {
            return Err(ConfigError::Invalid(
                "max_guesses must be at least 1".to_string(),
            ));
        }
        if self.word_length == 0 {
            return Err(ConfigError::Invalid(
                "word_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
