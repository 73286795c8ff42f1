//! Integration tests for SQLite-backed progress and result history.

mod support;

use chrono::Utc;
use quizroom_core::{
    Command, CompletionReason, Database, KvProgressStore, ManualTimer, ProgressStore,
    QuizController, QuizEvent,
};
use support::{questions_json, RecordingSurface, StaticQuestions, NAMESPACE};

fn kv_controller(
    path: &std::path::Path,
    duration_secs: u64,
) -> QuizController<KvProgressStore, RecordingSurface, ManualTimer> {
    let store = KvProgressStore::new(Database::open_at(path).unwrap(), NAMESPACE);
    QuizController::new(store, RecordingSurface::default(), ManualTimer::new(), duration_secs)
}

#[test]
fn progress_survives_restart() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("quizroom.db");
    let payload = StaticQuestions(questions_json(5));

    {
        let mut controller = kv_controller(&db_path, 300);
        controller.initialize(&payload).unwrap();
        controller.dispatch(Command::SelectChoice(0));
        controller.dispatch(Command::GoNext);
        controller.dispatch(Command::Skip);
        controller.on_tick();
        controller.on_tick();
        controller.shutdown();
    }

    let mut controller = kv_controller(&db_path, 300);
    controller.initialize(&payload).unwrap();
    assert_eq!(controller.current_index(), 2);
    assert_eq!(controller.state().answers.recorded(), 2);
    assert_eq!(controller.remaining_secs(), 298);
    // The countdown restarts from the saved value.
    assert_eq!(controller.timer().starts(), 1);
}

#[test]
fn corrupt_row_is_ignored() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("quizroom.db");
    Database::open_at(&db_path)
        .unwrap()
        .kv_set(NAMESPACE, "\"just a string\"")
        .unwrap();

    let mut controller = kv_controller(&db_path, 5400);
    controller
        .initialize(&StaticQuestions(questions_json(2)))
        .unwrap();
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.remaining_secs(), 5400);

    // The fresh state replaced the corrupt row.
    assert!(controller.store().load(1).is_some());
}

#[test]
fn completed_session_can_be_recorded() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("quizroom.db");

    let mut controller = kv_controller(&db_path, 60);
    controller
        .initialize(&StaticQuestions(questions_json(1)))
        .unwrap();
    let events = controller.dispatch(Command::SelectChoice(0));

    let (reason, summary) = events
        .iter()
        .find_map(|e| match e {
            QuizEvent::SessionCompleted { reason, summary, .. } => Some((*reason, *summary)),
            _ => None,
        })
        .expect("session completes");
    assert_eq!(reason, CompletionReason::AllRecorded);

    let db = controller.store().database();
    db.record_result(NAMESPACE, &summary, reason, Utc::now()).unwrap();
    let results = db.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].correct, 1);
    assert_eq!(results[0].total, 1);
}

#[test]
fn expired_session_completes_once_across_restarts() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("quizroom.db");
    let payload = StaticQuestions(questions_json(3));

    // Completions after load are the ones a front end records as new results.
    let mut live_completions = 0;
    for _ in 0..3 {
        let mut controller = kv_controller(&db_path, 1);
        controller.initialize(&payload).unwrap();
        for _ in 0..3 {
            live_completions += controller
                .on_tick()
                .iter()
                .filter(|e| matches!(e, QuizEvent::SessionCompleted { .. }))
                .count();
        }
        controller.shutdown();
    }
    assert_eq!(live_completions, 1);

    let controller = kv_controller(&db_path, 1);
    assert_eq!(controller.store().load(1).unwrap().remaining_secs, 0);
}
