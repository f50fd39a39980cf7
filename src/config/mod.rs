//! Configuration management module
//!
//! Handles loading, saving, and validation of quiz timing and scoring
//! settings.

use crate::{
    QuizError, Result, ADVANCE_DELAY_MS, APP_NAME, CONFIG_FILE, CORRECT_AWARD,
    LOBBY_START_DELAY_MS, QUESTION_DURATION,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod persistence;

/// Quiz configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Seconds each question stays open
    pub question_duration_secs: u32,
    /// Pause after lock-in before the next question (milliseconds)
    pub advance_delay_ms: u64,
    /// Points for a correct answer
    pub correct_award: u32,
    /// Lobby wait before the quiz starts (milliseconds)
    pub lobby_start_delay_ms: u64,
    /// UI redraw/event poll period (milliseconds)
    pub tick_rate_ms: u64,
    /// Maximum characters accepted for a room code
    pub max_room_code_len: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_duration_secs: QUESTION_DURATION,
            advance_delay_ms: ADVANCE_DELAY_MS,
            correct_award: CORRECT_AWARD,
            lobby_start_delay_ms: LOBBY_START_DELAY_MS,
            tick_rate_ms: 250,
            max_room_code_len: 6,
        }
    }
}

impl QuizConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.question_duration_secs == 0 {
            return Err(QuizError::ConfigError(
                "Question duration must be greater than 0".to_string(),
            ));
        }

        const MAX_QUESTION_DURATION: u32 = 300;
        if self.question_duration_secs > MAX_QUESTION_DURATION {
            return Err(QuizError::ConfigError(format!(
                "Question duration too long: {}s (max: {}s)",
                self.question_duration_secs, MAX_QUESTION_DURATION
            )));
        }

        if self.advance_delay_ms == 0 {
            return Err(QuizError::ConfigError(
                "Advance delay must be greater than 0".to_string(),
            ));
        }

        if self.correct_award == 0 {
            return Err(QuizError::ConfigError(
                "Correct answer award must be greater than 0".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 || self.tick_rate_ms > 1000 {
            return Err(QuizError::ConfigError(
                "Tick rate must be between 1 and 1000 ms".to_string(),
            ));
        }

        const MAX_ROOM_CODE_LEN: usize = 12;
        if self.max_room_code_len == 0 || self.max_room_code_len > MAX_ROOM_CODE_LEN {
            return Err(QuizError::ConfigError(format!(
                "Room code length must be between 1 and {}",
                MAX_ROOM_CODE_LEN
            )));
        }

        Ok(())
    }

    /// Set the per-question duration
    pub fn with_question_duration(mut self, secs: u32) -> Self {
        self.question_duration_secs = secs;
        self
    }

    /// Set the lock-in to next question delay
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the award for a correct answer
    pub fn with_correct_award(mut self, award: u32) -> Self {
        self.correct_award = award;
        self
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn lobby_start_delay(&self) -> Duration {
        Duration::from_millis(self.lobby_start_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, defaulting when it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        tracing::info!(path = %config_path.display(), "loaded config");

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizmaster/quizmaster.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
