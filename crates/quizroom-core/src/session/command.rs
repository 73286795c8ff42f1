use serde::{Deserialize, Serialize};

/// A user gesture, independent of how the front end captured it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "index", rename_all = "snake_case")]
pub enum Command {
    SelectChoice(usize),
    GoNext,
    GoPrevious,
    Skip,
    JumpTo(usize),
}
