//! Plain-text render surface.

use std::io::Write;

use quizroom_core::session::Focus;
use quizroom_core::{ChoiceMark, Controls, ExplanationView, NavEntry, QuestionView, RenderSurface};

use crate::input::choice_letter;

/// Writes every update as lines of text.
///
/// Ticks are only printed on minute boundaries and right after a question
/// is drawn, so the scrollback stays readable.
pub struct TerminalSurface<W: Write> {
    out: W,
    question: Option<QuestionView>,
    navigator: Vec<NavEntry>,
    time_due: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            question: None,
            navigator: Vec::new(),
            time_due: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // A closed stdout leaves nothing useful to do.
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    /// Describe what a keyboard focus points at.
    pub fn show_focus(&mut self, focus: Focus) {
        let text = match focus {
            Focus::Choice(i) => match self.question.as_ref().and_then(|q| q.choices.get(i)) {
                Some(choice) => format!("> focus: {}) {}", choice_letter(i), choice.label),
                None => "> focus: no choice".to_string(),
            },
            Focus::Navigator(i) => format!("> focus: question {}", i + 1),
        };
        self.line(&text);
    }

    pub fn notice(&mut self, text: &str) {
        self.line(text);
    }
}

fn mark_symbol(mark: ChoiceMark) -> &'static str {
    match mark {
        ChoiceMark::Open => "[ ]",
        ChoiceMark::Locked => "[-]",
        ChoiceMark::Correct => "[+]",
        ChoiceMark::Wrong => "[x]",
    }
}

fn nav_cell(entry: &NavEntry) -> String {
    let flag = if entry.skipped {
        "~"
    } else if entry.answered {
        "*"
    } else {
        ""
    };
    if entry.active {
        format!("<{}{flag}>", entry.number)
    } else {
        format!(" {}{flag} ", entry.number)
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn show_question(&mut self, view: &QuestionView) {
        self.line("");
        self.line(&view.text);
        for (i, choice) in view.choices.iter().enumerate() {
            let mark = mark_symbol(choice.mark);
            let text = format!("  {mark} {}) {}", choice_letter(i), choice.label);
            self.line(&text);
        }
        if let ExplanationView::Shown { text, correct } = &view.explanation {
            let verdict = if *correct { "Correct." } else { "Incorrect." };
            let text = format!("{verdict} {text}");
            self.line(&text);
        }
        self.question = Some(view.clone());
        self.time_due = true;
    }

    fn show_navigator(&mut self, entries: &[NavEntry]) {
        if entries == self.navigator.as_slice() {
            return;
        }
        self.navigator = entries.to_vec();
        let cells: String = entries.iter().map(nav_cell).collect();
        self.line(&cells);
    }

    fn show_time(&mut self, hms: &str) {
        if self.time_due || hms.ends_with(":00") {
            self.time_due = false;
            let text = format!("Time left: {hms}");
            self.line(&text);
        }
    }

    fn show_progress(&mut self, answered: usize, total: usize) {
        let text = format!("Answered: {answered}/{total}");
        self.line(&text);
    }

    fn set_controls(&mut self, controls: Controls) {
        let mut hints = Vec::new();
        if controls.prev_enabled {
            hints.push("[p]rev");
        }
        if controls.next_enabled {
            hints.push("[n]ext");
        }
        if controls.skip_enabled {
            hints.push("[s]kip");
        }
        if !hints.is_empty() {
            let text = hints.join(" ");
            self.line(&text);
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.line("Loading questions...");
        }
    }

    fn alert(&mut self, message: &str) {
        self.line("");
        for text in message.lines() {
            self.line(&format!("!! {text}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizroom_core::ChoiceView;

    fn view() -> QuestionView {
        QuestionView {
            number: 1,
            text: "1. Pick one".into(),
            choices: vec![
                ChoiceView {
                    label: "yes".into(),
                    mark: ChoiceMark::Correct,
                },
                ChoiceView {
                    label: "no".into(),
                    mark: ChoiceMark::Wrong,
                },
            ],
            explanation: ExplanationView::Shown {
                text: "Explanation: because".into(),
                correct: false,
            },
        }
    }

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn question_lists_marked_choices() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_question(&view());
        let out = output(surface);
        assert!(out.contains("1. Pick one"));
        assert!(out.contains("[+] a) yes"));
        assert!(out.contains("[x] b) no"));
        assert!(out.contains("Incorrect. Explanation: because"));
    }

    #[test]
    fn time_prints_after_question_and_on_minutes() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_question(&view());
        surface.show_time("00:01:30");
        surface.show_time("00:01:29");
        surface.show_time("00:01:00");
        let out = output(surface);
        assert!(out.contains("Time left: 00:01:30"));
        assert!(!out.contains("00:01:29"));
        assert!(out.contains("Time left: 00:01:00"));
    }

    #[test]
    fn navigator_marks_state() {
        let entries = [
            NavEntry {
                number: 1,
                active: false,
                answered: true,
                skipped: false,
            },
            NavEntry {
                number: 2,
                active: true,
                answered: true,
                skipped: true,
            },
            NavEntry {
                number: 3,
                active: false,
                answered: false,
                skipped: false,
            },
        ];
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_navigator(&entries);
        // Unchanged navigator is not redrawn.
        surface.show_navigator(&entries);
        let out = output(surface);
        assert_eq!(out, " 1* <2~> 3 \n");
    }

    #[test]
    fn alert_prefixes_each_line() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.alert("Quiz Complete!\nCorrect: 1");
        let out = output(surface);
        assert!(out.contains("!! Quiz Complete!\n!! Correct: 1\n"));
    }

    #[test]
    fn focus_names_choice_label() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_question(&view());
        surface.show_focus(Focus::Choice(1));
        surface.show_focus(Focus::Navigator(4));
        let out = output(surface);
        assert!(out.contains("> focus: b) no"));
        assert!(out.contains("> focus: question 5"));
    }
}
