//! Quiz session: answer state, persistence record, commands and the
//! controller that ties them to the outside world.

mod answer;
mod command;
mod controller;
mod keymap;
mod state;
mod summary;

pub use answer::{Answer, Answers};
pub use command::Command;
pub use controller::{QuizController, SessionPhase};
pub use keymap::{handle_key, Focus, Key, KeyOutcome};
pub use state::SessionState;
pub use summary::Summary;
