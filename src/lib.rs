//! QuizMaster - terminal quiz client
//!
//! A TUI application for joining a quiz room, answering timed
//! questions and comparing scores on a leaderboard.

use thiserror::Error;

pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod session;
pub mod store;
pub mod util;

// Common error types
#[derive(Debug, Error)]
pub enum QuizError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Key-value store or question bank persistence error
    #[error("Persistence error: {0}")]
    PersistenceError(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    TuiError(String),
    /// A question failed validation
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
    /// A session was requested over an empty question bank
    #[error("Question bank is empty")]
    EmptyQuestionBank,
    /// Join form submitted with missing details
    #[error("Invalid join request: {0}")]
    InvalidJoin(String),
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for QuizMaster operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Convert error to a short message suitable for a status line
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::EmptyQuestionBank => {
                "No questions available. Add some in the Admin panel first.".to_string()
            }
            QuizError::InvalidQuestion(_) => "Please fill in all fields".to_string(),
            QuizError::InvalidJoin(msg) => msg.clone(),
            QuizError::PersistenceError(_) => {
                "Failed to save data. Check disk space and permissions.".to_string()
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }

    /// Whether the application can keep running after this error
    pub fn is_recoverable(error: &QuizError) -> bool {
        !matches!(error, QuizError::TuiError(_))
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizmaster";
pub const CONFIG_FILE: &str = "quizmaster.toml";
pub const STORE_FILE: &str = "store.json";
pub const QUESTIONS_FILE: &str = "questions.json";
pub const LOG_FILE: &str = "quizmaster.log";

/// Seconds allotted to each question
pub const QUESTION_DURATION: u32 = 15;
/// Points granted for a correct answer
pub const CORRECT_AWARD: u32 = 100;
/// Delay between answer lock-in and the next question
pub const ADVANCE_DELAY_MS: u64 = 2000;
/// Delay before the lobby starts the quiz
pub const LOBBY_START_DELAY_MS: u64 = 5000;
/// Every question has exactly this many options
pub const OPTION_COUNT: usize = 4;
/// Room code shown when none was entered
pub const DEFAULT_ROOM_CODE: &str = "DEMO01";
/// Player name shown when none was entered
pub const DEFAULT_PLAYER_NAME: &str = "Player";
