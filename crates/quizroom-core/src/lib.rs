//! # Quizroom Core Library
//!
//! This library provides the core logic for Quizroom, a timed multiple-choice
//! quiz runner. It follows a CLI-first philosophy: everything a front end
//! needs is exposed here, and the bundled terminal client is a thin layer
//! over the same controller.
//!
//! ## Architecture
//!
//! - **Session Controller**: owns all session state and reacts to typed
//!   commands and timer ticks; the caller delivers both on one thread
//! - **Question Store**: fetches the question payload from a file or URL
//! - **Storage**: SQLite-backed progress and result history, TOML-based
//!   configuration
//! - **Render Surface**: trait the controller pushes view state into
//!
//! ## Key Components
//!
//! - [`QuizController`]: the session state machine
//! - [`QuestionSet`]: validated, immutable list of questions
//! - [`Countdown`]: session clock
//! - [`ProgressStore`]: saved progress gateway
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod question;
pub mod render;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, LoadError, StorageError};
pub use events::{CompletionReason, QuizEvent};
pub use question::{
    question_store_for, FileQuestionStore, HttpQuestionStore, Question, QuestionSet, QuestionStore,
};
pub use render::{
    ChoiceMark, ChoiceView, Controls, ExplanationView, NavEntry, QuestionView, RenderSurface,
};
pub use session::{Answer, Answers, Command, QuizController, SessionPhase, SessionState, Summary};
pub use storage::{Config, Database, KvProgressStore, MemoryProgressStore, ProgressStore};
pub use timer::{format_hms, Countdown, ManualTimer, TimerSource};
