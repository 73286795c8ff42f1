use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Summary;

/// Why a session reached `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    AllRecorded,
    TimeExpired,
}

/// Every state change in a session produces an Event.
/// Front ends may log or forward them; the controller does not depend on
/// anyone consuming them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuizEvent {
    SessionLoaded {
        question_count: usize,
        current_index: usize,
        restored: bool,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    AnswerRecorded {
        index: usize,
        choice: usize,
        correct: bool,
        at: DateTime<Utc>,
    },
    QuestionSkipped {
        index: usize,
        /// The skip replaced a recorded choice.
        overwrote_choice: bool,
        at: DateTime<Utc>,
    },
    Navigated {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimeExpired {
        at: DateTime<Utc>,
    },
    SessionCompleted {
        reason: CompletionReason,
        summary: Summary,
        at: DateTime<Utc>,
    },
}
