//! Quiz session controller.
//!
//! Sole owner of the session state and the only writer to the render
//! surface and the progress store. Every entry point runs to completion and
//! returns the events it produced; the caller serializes user commands and
//! timer ticks onto one thread.
//!
//! ## Session phases
//!
//! ```text
//! Loading -> Active -> Complete
//! ```
//!
//! A failed load leaves the controller in `Loading`, where every command and
//! tick is ignored. `Complete` is reached once every question has a recorded
//! state or the countdown expires. It does not lock the session: navigation
//! and answering still-unanswered questions keep working.
//!
//! ## Per-question states
//!
//! ```text
//! Unanswered -> Answered(choice) | Skipped
//! ```
//!
//! Both targets are final for selection. Skip is unconditional and replaces
//! an existing answer.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::answer::Answer;
use super::command::Command;
use super::state::SessionState;
use super::summary::Summary;
use crate::error::LoadError;
use crate::events::{CompletionReason, QuizEvent};
use crate::question::{Question, QuestionSet, QuestionStore};
use crate::render::{
    ChoiceMark, ChoiceView, Controls, ExplanationView, NavEntry, QuestionView, RenderSurface,
};
use crate::storage::ProgressStore;
use crate::timer::{format_hms, Countdown, Tick, TimerSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Loading,
    Active,
    Complete,
}

pub struct QuizController<P, R, T> {
    questions: Option<QuestionSet>,
    state: SessionState,
    countdown: Countdown,
    phase: SessionPhase,
    default_duration_secs: u64,
    store: P,
    surface: R,
    timer: T,
}

impl<P, R, T> QuizController<P, R, T>
where
    P: ProgressStore,
    R: RenderSurface,
    T: TimerSource,
{
    /// Create a controller in the `Loading` phase.
    ///
    /// `duration_secs` is the length of a fresh session; restored sessions
    /// keep their saved remaining time.
    pub fn new(store: P, surface: R, timer: T, duration_secs: u64) -> Self {
        Self {
            questions: None,
            state: SessionState::fresh(duration_secs),
            countdown: Countdown::new(duration_secs),
            phase: SessionPhase::Loading,
            default_duration_secs: duration_secs,
            store,
            surface,
            timer,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn question_count(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.as_ref()?.get(self.state.current_index)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn summary(&self) -> Option<Summary> {
        let questions = self.questions.as_ref()?;
        Some(Summary::compute(questions, &self.state.answers))
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Direct surface access for front-end chrome the controller does not
    /// own, such as focus hints.
    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the question set, restore saved progress and start the clock.
    ///
    /// Only acts in the `Loading` phase; once loaded, further calls return
    /// no events. A restored session that is already finished, by answers
    /// or by time, completes here without starting the clock.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the payload cannot be fetched or is not a
    /// non-empty list of valid questions. The failure is also alerted on the
    /// surface and the controller stays in `Loading`.
    pub fn initialize(&mut self, source: &dyn QuestionStore) -> Result<Vec<QuizEvent>, LoadError> {
        if self.phase != SessionPhase::Loading {
            return Ok(Vec::new());
        }

        self.surface.set_loading(true);
        self.surface.set_controls(Controls::disabled());

        let loaded = source
            .fetch()
            .and_then(|payload| QuestionSet::from_json(&payload));
        let questions = match loaded {
            Ok(questions) => questions,
            Err(e) => {
                warn!(location = %source.location(), error = %e, "failed to load questions");
                let message = match &e {
                    LoadError::Empty => e.to_string(),
                    _ => format!("Failed to load questions: {e}"),
                };
                self.surface.alert(&message);
                self.surface.set_loading(false);
                return Err(e);
            }
        };

        let restored = match self.store.load(self.default_duration_secs) {
            Some(saved) if saved.fits(&questions) => Some(saved),
            Some(_) => {
                warn!(
                    namespace = self.store.namespace(),
                    "saved progress does not match the question set, starting fresh"
                );
                None
            }
            None => None,
        };
        let was_restored = restored.is_some();
        self.state = restored.unwrap_or_else(|| SessionState::fresh(self.default_duration_secs));
        self.countdown = Countdown::new(self.state.remaining_secs);

        info!(
            questions = questions.len(),
            current = self.state.current_index,
            restored = was_restored,
            "quiz loaded"
        );

        let mut events = vec![QuizEvent::SessionLoaded {
            question_count: questions.len(),
            current_index: self.state.current_index,
            restored: was_restored,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }];

        self.questions = Some(questions);
        self.phase = SessionPhase::Active;
        self.display(false);

        // Ran out of time in an earlier run: the clock stays down.
        if was_restored && self.state.remaining_secs == 0 {
            self.surface.set_loading(false);
            events.extend(self.complete(CompletionReason::TimeExpired));
            return Ok(events);
        }

        if self.countdown.start() {
            self.timer.start();
            self.state.started = true;
            events.push(QuizEvent::TimerStarted {
                remaining_secs: self.countdown.remaining_secs(),
                at: Utc::now(),
            });
        }
        self.surface.set_loading(false);

        events.extend(self.check_completion());
        Ok(events)
    }

    /// Persist one last time, e.g. on exit. Nothing is written while still
    /// loading so a failed load never clobbers saved progress.
    pub fn shutdown(&mut self) {
        if self.phase != SessionPhase::Loading {
            self.persist();
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Single entry point for user gestures.
    pub fn dispatch(&mut self, command: Command) -> Vec<QuizEvent> {
        if self.phase == SessionPhase::Loading {
            debug!(?command, "ignored while loading");
            return Vec::new();
        }
        debug!(?command, index = self.state.current_index, "dispatch");

        match command {
            Command::SelectChoice(choice) => self.select_choice(choice),
            Command::GoNext => self.go_next(),
            Command::GoPrevious => self.go_previous(),
            Command::Skip => self.skip_current(),
            Command::JumpTo(index) => self.jump_to(index),
        }
    }

    fn select_choice(&mut self, choice: usize) -> Vec<QuizEvent> {
        let index = self.state.current_index;
        let correct = match self.current_question() {
            Some(q) if choice < q.choices.len() => q.is_correct(choice),
            _ => return Vec::new(),
        };
        if !self.state.answers.record_choice(index, choice) {
            return Vec::new();
        }

        self.render_question(true);
        self.persist();
        self.render_navigator();
        self.render_progress();

        let mut events = vec![QuizEvent::AnswerRecorded {
            index,
            choice,
            correct,
            at: Utc::now(),
        }];
        events.extend(self.check_completion());
        events
    }

    fn go_next(&mut self) -> Vec<QuizEvent> {
        let index = self.state.current_index;
        if index + 1 >= self.question_count() {
            return Vec::new();
        }
        self.navigate_to(index + 1)
    }

    fn go_previous(&mut self) -> Vec<QuizEvent> {
        let index = self.state.current_index;
        if index == 0 {
            return Vec::new();
        }
        self.navigate_to(index - 1)
    }

    fn jump_to(&mut self, index: usize) -> Vec<QuizEvent> {
        if index >= self.question_count() {
            return Vec::new();
        }
        self.navigate_to(index)
    }

    fn skip_current(&mut self) -> Vec<QuizEvent> {
        let index = self.state.current_index;
        let previous = self.state.answers.mark_skipped(index);
        self.persist();
        self.render_navigator();

        let mut events = vec![QuizEvent::QuestionSkipped {
            index,
            overwrote_choice: matches!(previous, Some(Answer::Choice(_))),
            at: Utc::now(),
        }];

        if index + 1 < self.question_count() {
            events.extend(self.navigate_to(index + 1));
        } else {
            self.display(false);
        }
        events.extend(self.check_completion());
        events
    }

    /// One second of the session clock.
    pub fn on_tick(&mut self) -> Vec<QuizEvent> {
        if self.phase == SessionPhase::Loading {
            return Vec::new();
        }

        match self.countdown.tick() {
            None => Vec::new(),
            Some(Tick::Ticked(remaining)) => {
                self.state.remaining_secs = remaining;
                self.surface.show_time(&format_hms(remaining));
                self.persist();
                vec![QuizEvent::TimerTicked {
                    remaining_secs: remaining,
                    at: Utc::now(),
                }]
            }
            Some(Tick::Expired) => {
                info!("time is up");
                self.timer.stop();
                self.state.remaining_secs = 0;
                self.surface.show_time(&format_hms(0));
                self.surface.alert("Time is up!");
                self.persist();

                let mut events = vec![QuizEvent::TimeExpired { at: Utc::now() }];
                events.extend(self.complete(CompletionReason::TimeExpired));
                events
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn navigate_to(&mut self, target: usize) -> Vec<QuizEvent> {
        let from = self.state.current_index;
        self.state.current_index = target;
        self.display(false);
        if from == target {
            return Vec::new();
        }
        vec![QuizEvent::Navigated {
            from,
            to: target,
            at: Utc::now(),
        }]
    }

    fn check_completion(&mut self) -> Vec<QuizEvent> {
        if self.state.all_recorded(self.question_count()) {
            self.complete(CompletionReason::AllRecorded)
        } else {
            Vec::new()
        }
    }

    fn complete(&mut self, reason: CompletionReason) -> Vec<QuizEvent> {
        if self.phase != SessionPhase::Active {
            return Vec::new();
        }
        self.phase = SessionPhase::Complete;
        self.countdown.stop();
        if self.timer.is_running() {
            self.timer.stop();
        }

        let Some(summary) = self.summary() else {
            return Vec::new();
        };
        info!(
            ?reason,
            correct = summary.correct,
            wrong = summary.wrong,
            skipped = summary.skipped,
            "quiz complete"
        );
        self.surface.alert(&summary.to_string());
        vec![QuizEvent::SessionCompleted {
            reason,
            summary,
            at: Utc::now(),
        }]
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!(namespace = self.store.namespace(), error = %e, "failed to save progress");
        }
    }

    /// Full redraw of the current question and its surroundings.
    fn display(&mut self, reveal_explanation: bool) {
        self.render_question(reveal_explanation);
        let controls = self.controls();
        self.surface.set_controls(controls);
        self.render_navigator();
        self.render_progress();
        let hms = self.countdown.display();
        self.surface.show_time(&hms);
        self.persist();
    }

    fn render_question(&mut self, reveal_explanation: bool) {
        if let Some(view) = self.question_view(self.state.current_index, reveal_explanation) {
            self.surface.show_question(&view);
        }
    }

    fn render_navigator(&mut self) {
        let entries = self.navigator();
        self.surface.show_navigator(&entries);
    }

    fn render_progress(&mut self) {
        let total = self.question_count();
        self.surface.show_progress(self.state.answered(), total);
    }

    fn controls(&self) -> Controls {
        if self.phase == SessionPhase::Loading {
            return Controls::disabled();
        }
        let index = self.state.current_index;
        Controls {
            prev_enabled: index > 0,
            next_enabled: index + 1 < self.question_count(),
            skip_enabled: true,
        }
    }

    fn navigator(&self) -> Vec<NavEntry> {
        (0..self.question_count())
            .map(|i| {
                let answer = self.state.answers.get(i);
                NavEntry {
                    number: i + 1,
                    active: i == self.state.current_index,
                    answered: answer.is_some(),
                    skipped: answer.is_some_and(Answer::is_skipped),
                }
            })
            .collect()
    }

    fn question_view(&self, index: usize, reveal_explanation: bool) -> Option<QuestionView> {
        let question = self.questions.as_ref()?.get(index)?;
        let answer = self.state.answers.get(index);

        let mut text = format!("{}. {}", index + 1, question.prompt);
        if answer == Some(Answer::Skipped) {
            text.push_str(" (Skipped)");
        }

        let choices = question
            .choices
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mark = match answer {
                    None => ChoiceMark::Open,
                    Some(Answer::Skipped) => ChoiceMark::Locked,
                    Some(Answer::Choice(_)) if i == question.correct_choice => ChoiceMark::Correct,
                    Some(Answer::Choice(c)) if i == c => ChoiceMark::Wrong,
                    Some(Answer::Choice(_)) => ChoiceMark::Locked,
                };
                ChoiceView {
                    label: label.clone(),
                    mark,
                }
            })
            .collect();

        let explanation = match (answer, &question.explanation) {
            (Some(Answer::Choice(c)), Some(text)) if reveal_explanation => ExplanationView::Shown {
                text: format!("Explanation: {text}"),
                correct: question.is_correct(c),
            },
            _ => ExplanationView::Hidden,
        };

        Some(QuestionView {
            number: index + 1,
            text,
            choices,
            explanation,
        })
    }
}
