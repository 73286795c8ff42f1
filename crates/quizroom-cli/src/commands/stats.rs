use clap::Subcommand;
use quizroom_core::Database;
use serde::Serialize;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Every completed session, newest first
    List,
    /// Totals across all completed sessions
    All,
}

#[derive(Debug, Default, Serialize)]
struct Totals {
    sessions: usize,
    correct: usize,
    wrong: usize,
    skipped: usize,
    unanswered: usize,
    best_score_pct: f64,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let results = db.results()?;

    match action {
        StatsAction::List => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        StatsAction::All => {
            let totals = results.iter().fold(Totals::default(), |mut t, r| {
                t.sessions += 1;
                t.correct += r.correct;
                t.wrong += r.wrong;
                t.skipped += r.skipped;
                t.unanswered += r.unanswered;
                if r.total > 0 {
                    let pct = r.correct as f64 * 100.0 / r.total as f64;
                    t.best_score_pct = t.best_score_pct.max(pct);
                }
                t
            });
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
    }
    Ok(())
}
