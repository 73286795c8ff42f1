use serde::{Deserialize, Serialize};

use super::answer::{Answer, Answers};
use crate::question::QuestionSet;

/// Mutable state of one quiz session; the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_index: usize,
    pub answers: Answers,
    pub remaining_secs: u64,
    /// Whether the countdown has been started this session. Not persisted.
    pub started: bool,
}

/// Flat storage record. Field names match the stored key layout.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRecord {
    #[serde(default)]
    current_index: usize,
    #[serde(default)]
    user_answers: Answers,
    #[serde(default)]
    timer_duration: Option<u64>,
}

impl SessionState {
    pub fn fresh(duration_secs: u64) -> Self {
        Self {
            current_index: 0,
            answers: Answers::new(),
            remaining_secs: duration_secs,
            started: false,
        }
    }

    /// Encode as the stored `{currentIndex, userAnswers, timerDuration}` record.
    ///
    /// # Errors
    ///
    /// Fails only if serde_json cannot serialize the record.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&ProgressRecord {
            current_index: self.current_index,
            user_answers: self.answers.clone(),
            timer_duration: Some(self.remaining_secs),
        })
    }

    /// Decode a stored record. Missing fields fall back to the start of a
    /// session; a missing duration uses `default_duration_secs`.
    ///
    /// # Errors
    ///
    /// Returns the serde error for malformed JSON or wrongly typed fields.
    pub fn from_json(json: &str, default_duration_secs: u64) -> Result<Self, serde_json::Error> {
        let record: ProgressRecord = serde_json::from_str(json)?;
        Ok(Self {
            current_index: record.current_index,
            answers: record.user_answers,
            remaining_secs: record.timer_duration.unwrap_or(default_duration_secs),
            started: false,
        })
    }

    /// Whether every index and choice in this state addresses `questions`.
    pub fn fits(&self, questions: &QuestionSet) -> bool {
        if self.current_index >= questions.len() {
            return false;
        }
        self.answers.iter().all(|(index, answer)| match questions.get(index) {
            None => false,
            Some(q) => match answer {
                Answer::Choice(c) => c < q.choices.len(),
                Answer::Skipped => true,
            },
        })
    }

    pub fn answered(&self) -> usize {
        self.answers.recorded()
    }

    /// Every question has a recorded state.
    pub fn all_recorded(&self, total: usize) -> bool {
        (0..total).all(|i| self.answers.is_recorded(i))
    }
}
