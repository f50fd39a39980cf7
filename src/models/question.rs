//! Question data models
//!
//! Contains the multiple-choice question record and the ordered,
//! non-empty question bank a quiz session is built from.

use crate::{QuizError, Result, OPTION_COUNT};
use serde::{Deserialize, Serialize};

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within a bank
    pub id: u32,
    /// Question text shown to the player
    pub prompt: String,
    /// Answer options, always four
    pub options: [String; OPTION_COUNT],
    /// Index into `options` of the correct answer
    pub correct_option_index: usize,
}

impl Question {
    /// Create a new question and validate it
    pub fn new(
        id: u32,
        prompt: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_option_index: usize,
    ) -> Result<Self> {
        let question = Self {
            id,
            prompt: prompt.into(),
            options: options.map(str::to_string),
            correct_option_index,
        };
        question.validate()?;
        Ok(question)
    }

    /// Check that the prompt and all options are filled in and the
    /// correct option points at one of them
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(QuizError::InvalidQuestion(format!(
                "question {} has an empty prompt",
                self.id
            )));
        }

        if let Some(blank) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuizError::InvalidQuestion(format!(
                "question {} has an empty option {}",
                self.id,
                crate::util::option_label(blank)
            )));
        }

        if self.correct_option_index >= OPTION_COUNT {
            return Err(QuizError::InvalidQuestion(format!(
                "question {} marks option {} as correct (max {})",
                self.id,
                self.correct_option_index,
                OPTION_COUNT - 1
            )));
        }

        Ok(())
    }

    /// Whether `option` is the correct answer
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option_index
    }

    /// Text of the correct option
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }
}

/// Ordered question sequence that is guaranteed to be non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting empty input, invalid questions and
    /// duplicate ids
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionBank);
        }

        for (i, question) in questions.iter().enumerate() {
            question.validate()?;
            if questions[..i].iter().any(|q| q.id == question.id) {
                return Err(QuizError::InvalidQuestion(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }

        Ok(Self { questions })
    }

    /// The built-in demo questions
    pub fn builtin() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Index of the final question
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }
}

/// Demo question set shipped with the application
pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            prompt: "What is the capital of France?".to_string(),
            options: ["London", "Berlin", "Paris", "Madrid"].map(str::to_string),
            correct_option_index: 2,
        },
        Question {
            id: 2,
            prompt: "Which planet is known as the Red Planet?".to_string(),
            options: ["Venus", "Mars", "Jupiter", "Saturn"].map(str::to_string),
            correct_option_index: 1,
        },
        Question {
            id: 3,
            prompt: "What is 2 + 2?".to_string(),
            options: ["3", "4", "5", "6"].map(str::to_string),
            correct_option_index: 1,
        },
    ]
}
