use std::fmt;

use serde::{Deserialize, Serialize};

use super::answer::{Answer, Answers};
use crate::question::QuestionSet;

/// Final tally of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub unanswered: usize,
    pub total: usize,
}

impl Summary {
    pub fn compute(questions: &QuestionSet, answers: &Answers) -> Self {
        let mut summary = Summary {
            total: questions.len(),
            ..Default::default()
        };
        for (index, question) in questions.iter().enumerate() {
            match answers.get(index) {
                Some(Answer::Skipped) => summary.skipped += 1,
                Some(Answer::Choice(c)) if question.is_correct(c) => summary.correct += 1,
                Some(Answer::Choice(_)) => summary.wrong += 1,
                None => summary.unanswered += 1,
            }
        }
        summary
    }

    /// Percentage of correct answers over all questions.
    pub fn score_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quiz Complete!\nCorrect: {}\nWrong: {}\nSkipped: {}",
            self.correct, self.wrong, self.skipped
        )
    }
}
