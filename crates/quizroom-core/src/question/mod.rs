//! Question records and the immutable question set.
//!
//! The on-disk format is a JSON array of objects shaped like
//! `{"question": "...", "choices": ["..", ".."], "answer": 1, "explanation": "..."}`.

mod store;

pub use store::{question_store_for, FileQuestionStore, HttpQuestionStore, QuestionStore};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub choices: Vec<String>,
    #[serde(rename = "answer")]
    pub correct_choice: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_choice
    }

    fn validate(&self, index: usize) -> Result<(), LoadError> {
        if self.choices.len() < 2 {
            return Err(LoadError::InvalidQuestion {
                index,
                message: format!("needs at least 2 choices, found {}", self.choices.len()),
            });
        }
        if self.correct_choice >= self.choices.len() {
            return Err(LoadError::InvalidQuestion {
                index,
                message: format!(
                    "answer {} is outside 0..{}",
                    self.correct_choice,
                    self.choices.len()
                ),
            });
        }
        Ok(())
    }
}

/// Ordered, non-empty list of questions fixed for a session.
///
/// The position of a question is its identity; answers are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a set from already-decoded questions.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Empty` for an empty list and
    /// `LoadError::InvalidQuestion` when a record fails the shape checks.
    pub fn new(questions: Vec<Question>) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            question.validate(index)?;
        }
        Ok(Self { questions })
    }

    /// Parse a raw payload as returned by a [`QuestionStore`].
    ///
    /// # Errors
    ///
    /// Anything that is not a non-empty JSON array of well-shaped question
    /// records is a `LoadError`.
    pub fn from_json(payload: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if !value.is_array() {
            return Err(LoadError::NotAList);
        }
        let questions: Vec<Question> = serde_json::from_value(value)?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
