//! Keyboard focus model.
//!
//! Choices and navigator entries are two focus rings. Enter/Space activate
//! the focused element; Up/Down move among choices and Left/Right among
//! navigator entries. Focus never wraps and never leaves its ring.

use super::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Choice(usize),
    Navigator(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Move(Focus),
    Dispatch(Command),
    Ignore,
}

/// Resolve a key press against the current focus.
///
/// `choice_count` and `question_count` bound the two rings. Navigator keys
/// are dead while the question set is still loading.
pub fn handle_key(
    focus: Focus,
    key: Key,
    choice_count: usize,
    question_count: usize,
    loading: bool,
) -> KeyOutcome {
    match focus {
        Focus::Choice(i) => match key {
            Key::Enter | Key::Space => KeyOutcome::Dispatch(Command::SelectChoice(i)),
            Key::Down if i + 1 < choice_count => KeyOutcome::Move(Focus::Choice(i + 1)),
            Key::Up if i > 0 => KeyOutcome::Move(Focus::Choice(i - 1)),
            _ => KeyOutcome::Ignore,
        },
        Focus::Navigator(_) if loading => KeyOutcome::Ignore,
        Focus::Navigator(i) => match key {
            Key::Enter | Key::Space => KeyOutcome::Dispatch(Command::JumpTo(i)),
            Key::Right if i + 1 < question_count => KeyOutcome::Move(Focus::Navigator(i + 1)),
            Key::Left if i > 0 => KeyOutcome::Move(Focus::Navigator(i - 1)),
            _ => KeyOutcome::Ignore,
        },
    }
}
