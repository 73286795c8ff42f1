//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use quizroom_core::{
    Controls, LoadError, ManualTimer, MemoryProgressStore, NavEntry, QuestionStore, QuestionView,
    QuizController, RenderSurface,
};

pub const NAMESPACE: &str = "istqb_progress";

/// Surface that remembers the last value pushed through every channel.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub question: Option<QuestionView>,
    pub navigator: Vec<NavEntry>,
    pub time: Option<String>,
    pub progress: Option<(usize, usize)>,
    pub controls: Option<Controls>,
    pub loading: bool,
    pub loading_toggles: usize,
    pub alerts: Vec<String>,
    pub question_renders: usize,
}

impl RenderSurface for RecordingSurface {
    fn show_question(&mut self, view: &QuestionView) {
        self.question = Some(view.clone());
        self.question_renders += 1;
    }

    fn show_navigator(&mut self, entries: &[NavEntry]) {
        self.navigator = entries.to_vec();
    }

    fn show_time(&mut self, hms: &str) {
        self.time = Some(hms.to_string());
    }

    fn show_progress(&mut self, answered: usize, total: usize) {
        self.progress = Some((answered, total));
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = Some(controls);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_toggles += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// In-memory question payload.
pub struct StaticQuestions(pub String);

impl QuestionStore for StaticQuestions {
    fn location(&self) -> String {
        "memory".into()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.0.clone())
    }
}

/// Source that always fails like an unreachable server.
pub struct Unreachable;

impl QuestionStore for Unreachable {
    fn location(&self) -> String {
        "http://unreachable.invalid/questions.json".into()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Err(LoadError::Status {
            url: self.location(),
            status: 503,
        })
    }
}

pub type TestController = QuizController<MemoryProgressStore, RecordingSurface, ManualTimer>;

/// `n` questions with three choices each; question `i` has answer `i % 3`.
pub fn questions_json(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"question": "Question {i}", "choices": ["a", "b", "c"], "answer": {}, "explanation": "Because {i}."}}"#,
                i % 3
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

pub fn controller_with_store(store: MemoryProgressStore, duration_secs: u64) -> TestController {
    QuizController::new(
        store,
        RecordingSurface::default(),
        ManualTimer::new(),
        duration_secs,
    )
}

/// Loaded controller with `n` questions, no saved progress.
pub fn loaded(n: usize, duration_secs: u64) -> TestController {
    let mut controller = controller_with_store(MemoryProgressStore::new(NAMESPACE), duration_secs);
    controller
        .initialize(&StaticQuestions(questions_json(n)))
        .expect("questions load");
    controller
}
