//! Line-oriented input for the interactive session.

use quizroom_core::session::Key;
use quizroom_core::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Key(Key),
    /// Move focus between the choice list and the navigator.
    SwitchFocus,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
a-z / 1-9   choose an answer
n / p / s   next, previous, skip
g N         go to question N
up, down    move between choices
left, right move between questions
enter/space activate the focused item
tab         switch focus between choices and questions
?           this help
q           save and quit";

/// Parse one line. Single-letter commands win over choice letters.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim().to_ascii_lowercase();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Input::Unknown(line);
    };
    let rest: Vec<&str> = words.collect();

    match (head, rest.as_slice()) {
        ("n" | "next", []) => Input::Command(Command::GoNext),
        ("p" | "prev", []) => Input::Command(Command::GoPrevious),
        ("s" | "skip", []) => Input::Command(Command::Skip),
        ("q" | "quit", []) => Input::Quit,
        ("?" | "help", []) => Input::Help,
        ("tab", []) => Input::SwitchFocus,
        ("up", []) => Input::Key(Key::Up),
        ("down", []) => Input::Key(Key::Down),
        ("left", []) => Input::Key(Key::Left),
        ("right", []) => Input::Key(Key::Right),
        ("enter", []) => Input::Key(Key::Enter),
        ("space", []) => Input::Key(Key::Space),
        ("g" | "go", [n]) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Command(Command::JumpTo(n - 1)),
            _ => Input::Unknown(line.clone()),
        },
        (choice, []) => choice_index(choice)
            .map(|i| Input::Command(Command::SelectChoice(i)))
            .unwrap_or(Input::Unknown(line.clone())),
        _ => Input::Unknown(line.clone()),
    }
}

fn choice_index(word: &str) -> Option<usize> {
    let mut chars = word.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        '1'..='9' => Some(c as usize - '1' as usize),
        _ => None,
    }
}

/// Label shown next to choice `index`.
pub fn choice_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| (b'a' + i) as char)
}
