use clap::Subcommand;
use quizroom_core::{question_store_for, QuestionSet};

#[derive(Subcommand)]
pub enum QuestionsAction {
    /// Validate a question file or URL
    Check {
        /// Path or http(s) URL
        location: String,
    },
}

pub fn run(action: QuestionsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuestionsAction::Check { location } => {
            let payload = question_store_for(&location).fetch()?;
            let set = QuestionSet::from_json(&payload)?;
            let explained = set.iter().filter(|q| q.explanation.is_some()).count();
            println!(
                "{} questions ok ({explained} with explanations)",
                set.len()
            );
        }
    }
    Ok(())
}
