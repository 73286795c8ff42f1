//! Saved-progress subcommands: `status`, `summary`, `reset`.

use quizroom_core::{
    question_store_for, Config, Database, KvProgressStore, ProgressStore, QuestionSet, Summary,
};
use serde::Serialize;

fn open_store(config: &Config) -> Result<KvProgressStore, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(KvProgressStore::new(db, config.storage.namespace.clone()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    namespace: String,
    saved: bool,
    current_index: Option<usize>,
    answered: usize,
    remaining: Option<String>,
}

pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let state = store.load(config.quiz.duration_secs);

    let status = Status {
        namespace: store.namespace().to_string(),
        saved: state.is_some(),
        current_index: state.as_ref().map(|s| s.current_index),
        answered: state.as_ref().map_or(0, |s| s.answered()),
        remaining: state
            .as_ref()
            .map(|s| quizroom_core::format_hms(s.remaining_secs)),
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub fn summary(questions: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let location = questions.unwrap_or_else(|| config.quiz.questions.clone());
    let set = QuestionSet::from_json(&question_store_for(&location).fetch()?)?;

    let store = open_store(&config)?;
    let Some(state) = store.load(config.quiz.duration_secs) else {
        println!("no saved progress");
        return Ok(());
    };
    if !state.fits(&set) {
        return Err(format!("saved progress does not match {location}").into());
    }

    let summary = Summary::compute(&set, &state.answers);
    println!("Correct: {}", summary.correct);
    println!("Wrong: {}", summary.wrong);
    println!("Skipped: {}", summary.skipped);
    println!("Unanswered: {}", summary.unanswered);
    println!("Score: {:.1}%", summary.score_pct());
    Ok(())
}

pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;
    if store.clear()? {
        println!("progress cleared");
    } else {
        println!("no saved progress");
    }
    Ok(())
}
