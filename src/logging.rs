//! Logging setup
//!
//! The terminal is owned by the TUI, so log output goes to a file in the
//! data directory. The filter comes from `QUIZMASTER_LOG` and defaults
//! to `info`.

use crate::{QuizError, Result, APP_NAME, LOG_FILE};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "QUIZMASTER_LOG";

/// Get the standard log file path
/// Uses $DATA_HOME/quizmaster/quizmaster.log
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| QuizError::ConfigError("Unable to determine data directory".to_string()))?;

    Ok(data_dir.join(APP_NAME).join(LOG_FILE))
}

/// Install the global subscriber writing to `path`
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| QuizError::ConfigError(format!("Failed to install logger: {}", e)))
}

/// Install file logging at the standard location.
///
/// Failure is reported on stderr and otherwise ignored; the app runs
/// without logs.
pub fn init() {
    let result = log_file_path().and_then(|path| init_file_logging(&path));
    if let Err(e) = result {
        eprintln!("quizmaster: logging disabled: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path().unwrap();
        assert!(path.ends_with("quizmaster/quizmaster.log"));
    }
}
