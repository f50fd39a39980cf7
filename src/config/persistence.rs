//! Question bank persistence module
//!
//! Handles saving and loading of the admin-edited question bank.

use crate::models::question::{builtin_questions, Question};
use crate::{QuizError, Result, APP_NAME, QUESTIONS_FILE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Question bank storage manager
#[derive(Debug, Clone)]
pub struct QuestionBankStorage {
    questions_path: PathBuf,
}

/// Questions file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct QuestionsFile {
    version: u32,
    updated_at: DateTime<Utc>,
    questions: Vec<Question>,
}

impl QuestionBankStorage {
    /// Create a storage manager at the standard location
    pub fn new() -> Result<Self> {
        let questions_path = Self::questions_file_path()?;
        Ok(Self { questions_path })
    }

    /// Create a storage manager for an explicit file
    pub fn at(questions_path: PathBuf) -> Self {
        Self { questions_path }
    }

    /// Get the standard questions file path
    /// Uses $DATA_HOME/quizmaster/questions.json
    pub fn questions_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(QUESTIONS_FILE))
    }

    /// Load the saved questions, or the built-in set when nothing was
    /// saved yet.
    ///
    /// A saved empty list is returned as-is; starting a quiz from it
    /// fails later.
    pub fn load_questions(&self) -> Result<Vec<Question>> {
        if !self.questions_path.exists() {
            return Ok(builtin_questions());
        }

        let content = fs::read_to_string(&self.questions_path).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to read questions file {}: {}",
                self.questions_path.display(),
                e
            ))
        })?;

        let questions_file: QuestionsFile = serde_json::from_str(&content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to parse questions file {}: {}",
                self.questions_path.display(),
                e
            ))
        })?;

        for question in &questions_file.questions {
            question.validate()?;
        }

        Ok(questions_file.questions)
    }

    /// Replace the saved question bank
    pub fn save_questions(&self, questions: &[Question]) -> Result<()> {
        if let Some(parent) = self.questions_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let questions_file = QuestionsFile {
            version: 1,
            updated_at: Utc::now(),
            questions: questions.to_vec(),
        };

        let content = serde_json::to_string_pretty(&questions_file)?;

        fs::write(&self.questions_path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write questions file {}: {}",
                self.questions_path.display(),
                e
            ))
        })?;

        tracing::info!(count = questions.len(), "saved question bank");
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.questions_path
    }
}
