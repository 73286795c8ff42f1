//! Interactive quiz session on stdin/stdout.

use std::io::Stdout;
use std::time::Duration;

use clap::Args;
use quizroom_core::session::{handle_key, Focus, KeyOutcome};
use quizroom_core::{
    question_store_for, Command, Config, Database, KvProgressStore, MemoryProgressStore,
    ProgressStore, QuizController, QuizEvent, StorageError, TimerSource,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::input::{parse_line, Input, HELP};
use crate::terminal::TerminalSurface;

#[derive(Args)]
pub struct RunArgs {
    /// Question file or URL (defaults to quiz.questions)
    #[arg(long)]
    questions: Option<String>,
    /// Session length in seconds for a fresh start (defaults to quiz.duration_secs)
    #[arg(long)]
    duration: Option<u64>,
    /// Keep progress in memory only
    #[arg(long)]
    no_save: bool,
}

/// Progress backend picked from config and flags.
pub enum SessionStore {
    Kv(KvProgressStore),
    Memory(MemoryProgressStore),
}

impl ProgressStore for SessionStore {
    fn namespace(&self) -> &str {
        match self {
            Self::Kv(s) => s.namespace(),
            Self::Memory(s) => s.namespace(),
        }
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        match self {
            Self::Kv(s) => s.read(),
            Self::Memory(s) => s.read(),
        }
    }

    fn write(&mut self, record: &str) -> Result<(), StorageError> {
        match self {
            Self::Kv(s) => s.write(record),
            Self::Memory(s) => s.write(record),
        }
    }

    fn clear(&mut self) -> Result<bool, StorageError> {
        match self {
            Self::Kv(s) => s.clear(),
            Self::Memory(s) => s.clear(),
        }
    }
}

/// One-second clock switch. The session loop polls its interval only while
/// this is running.
#[derive(Debug, Default)]
pub struct ClockTimer {
    running: bool,
}

impl TimerSource for ClockTimer {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

type Session = QuizController<SessionStore, TerminalSurface<Stdout>, ClockTimer>;

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let location = args.questions.unwrap_or_else(|| config.quiz.questions.clone());
    let duration = args.duration.unwrap_or(config.quiz.duration_secs);
    let namespace = config.storage.namespace.clone();

    let store = if args.no_save || !config.storage.enabled {
        SessionStore::Memory(MemoryProgressStore::new(namespace))
    } else {
        SessionStore::Kv(KvProgressStore::new(Database::open()?, namespace))
    };

    let mut controller = QuizController::new(
        store,
        TerminalSurface::new(std::io::stdout()),
        ClockTimer::default(),
        duration,
    );

    // The HTTP store drives its own runtime, so load before ours exists.
    // Completions during load come from restored sessions that finished in
    // an earlier run, by answers or by time, and were recorded then.
    let source = question_store_for(&location);
    controller.initialize(source.as_ref())?;
    controller.surface_mut().notice("Type ? for help.");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session_loop(&mut controller));
    // Stdin reads block a worker thread until the next newline.
    runtime.shutdown_background();
    result?;
    Ok(())
}

async fn session_loop(controller: &mut Session) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock = tokio::time::interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    clock.tick().await;

    // One listener for the whole session so no SIGINT falls between polls.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut focus = Focus::Choice(0);
    loop {
        let ticking = controller.timer().is_running();
        tokio::select! {
            _ = clock.tick(), if ticking => {
                let events = controller.on_tick();
                record_completion(controller, &events);
            }
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !handle_line(controller, &mut focus, &line) {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c => break,
        }
    }

    controller.shutdown();
    info!("session saved");
    Ok(())
}

/// Apply one input line. Returns false when the user quits.
fn handle_line(controller: &mut Session, focus: &mut Focus, line: &str) -> bool {
    match parse_line(line) {
        Input::Command(command) => apply(controller, focus, command),
        Input::Key(key) => {
            let choices = controller.current_question().map_or(0, |q| q.choices.len());
            let outcome = handle_key(
                *focus,
                key,
                choices,
                controller.question_count(),
                controller.is_loading(),
            );
            match outcome {
                KeyOutcome::Move(next) => {
                    *focus = next;
                    controller.surface_mut().show_focus(next);
                }
                KeyOutcome::Dispatch(command) => apply(controller, focus, command),
                KeyOutcome::Ignore => {}
            }
        }
        Input::SwitchFocus => {
            *focus = match *focus {
                Focus::Choice(_) => Focus::Navigator(controller.current_index()),
                Focus::Navigator(_) => Focus::Choice(0),
            };
            controller.surface_mut().show_focus(*focus);
        }
        Input::Help => controller.surface_mut().notice(HELP),
        Input::Quit => return false,
        Input::Unknown(text) => {
            let text = format!("unknown input {text:?}, type ? for help");
            controller.surface_mut().notice(&text);
        }
    }
    true
}

fn apply(controller: &mut Session, focus: &mut Focus, command: Command) {
    let events = controller.dispatch(command);
    let navigated = events
        .iter()
        .any(|e| matches!(e, QuizEvent::Navigated { .. }));
    if navigated && matches!(focus, Focus::Choice(_)) {
        *focus = Focus::Choice(0);
    }
    record_completion(controller, &events);
}

fn record_completion(controller: &mut Session, events: &[QuizEvent]) {
    for event in events {
        let QuizEvent::SessionCompleted { reason, summary, at } = event else {
            continue;
        };
        let SessionStore::Kv(store) = controller.store() else {
            continue;
        };
        if let Err(e) = store
            .database()
            .record_result(store.namespace(), summary, *reason, *at)
        {
            warn!(error = %e, "failed to record result");
        }
        controller
            .surface_mut()
            .notice("Run `quizroom-cli reset` to start a new session.");
    }
}
