//! Render surface contract.
//!
//! The controller pushes fully-built view values into a [`RenderSurface`]
//! and never reads anything back, so a surface can be a terminal, a GUI
//! widget tree, or a recorder in tests.

use serde::Serialize;

/// Visual state of one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceMark {
    /// Selectable.
    Open,
    /// Not selectable, no highlight.
    Locked,
    /// Not selectable, highlighted as the right answer.
    Correct,
    /// Not selectable, highlighted as the user's wrong pick.
    Wrong,
}

impl ChoiceMark {
    pub fn is_interactive(self) -> bool {
        self == ChoiceMark::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub label: String,
    pub mark: ChoiceMark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ExplanationView {
    Hidden,
    Shown { text: String, correct: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based position.
    pub number: usize,
    /// `"{number}. {prompt}"`, with `" (Skipped)"` appended when skipped.
    pub text: String,
    pub choices: Vec<ChoiceView>,
    pub explanation: ExplanationView,
}

/// One navigator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub number: usize,
    pub active: bool,
    /// Any recorded state, skipped included.
    pub answered: bool,
    pub skipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub skip_enabled: bool,
}

impl Controls {
    pub fn disabled() -> Self {
        Self {
            prev_enabled: false,
            next_enabled: false,
            skip_enabled: false,
        }
    }
}

pub trait RenderSurface {
    fn show_question(&mut self, view: &QuestionView);
    fn show_navigator(&mut self, entries: &[NavEntry]);
    /// Remaining time as `HH:MM:SS`.
    fn show_time(&mut self, hms: &str);
    fn show_progress(&mut self, answered: usize, total: usize);
    fn set_controls(&mut self, controls: Controls);
    fn set_loading(&mut self, loading: bool);
    /// Blocking user-facing message (load failure, time up, summary).
    fn alert(&mut self, message: &str);
}
