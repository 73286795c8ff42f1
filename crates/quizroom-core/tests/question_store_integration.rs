//! Integration tests for question sources.
//!
//! The HTTP store is exercised against a local mockito server.

mod support;

use indoc::indoc;
use quizroom_core::{
    question_store_for, Command, FileQuestionStore, HttpQuestionStore, LoadError,
    MemoryProgressStore, QuestionSet, QuestionStore, SessionPhase,
};
use support::{controller_with_store, NAMESPACE};

const QUESTIONS: &str = indoc! {r#"
    [
      {
        "question": "Which test level focuses on interactions between components?",
        "choices": ["Unit", "Integration", "System", "Acceptance"],
        "answer": 1,
        "explanation": "Integration testing targets component interfaces."
      },
      {
        "question": "Is exhaustive testing possible?",
        "choices": ["Yes", "No"],
        "answer": 1
      }
    ]
"#};

#[test]
fn http_store_fetches_payload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/questions.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(QUESTIONS)
        .create();

    let url = format!("{}/questions.json", server.url());
    let store = HttpQuestionStore::new(url.parse().unwrap());
    let payload = store.fetch().unwrap();
    mock.assert();

    let set = QuestionSet::from_json(&payload).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.get(0).unwrap().choices.len(), 4);
}

#[test]
fn http_error_status_is_load_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/questions.json")
        .with_status(404)
        .create();

    let url = format!("{}/questions.json", server.url());
    let store = question_store_for(&url);
    match store.fetch() {
        Err(LoadError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[test]
fn controller_loads_from_http() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/questions.json")
        .with_status(200)
        .with_body(QUESTIONS)
        .create();

    let url = format!("{}/questions.json", server.url());
    let store = question_store_for(&url);
    let mut controller = controller_with_store(MemoryProgressStore::new(NAMESPACE), 60);
    controller.initialize(store.as_ref()).unwrap();

    assert_eq!(controller.phase(), SessionPhase::Active);
    assert_eq!(controller.question_count(), 2);
    controller.dispatch(Command::SelectChoice(1));
    assert_eq!(controller.summary().unwrap().correct, 1);
}

#[test]
fn controller_loads_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("questions.json");
    std::fs::write(&path, QUESTIONS).unwrap();

    let mut controller = controller_with_store(MemoryProgressStore::new(NAMESPACE), 60);
    controller
        .initialize(&FileQuestionStore::new(&path))
        .unwrap();
    assert_eq!(
        controller.surface().question.as_ref().unwrap().text,
        "1. Which test level focuses on interactions between components?"
    );
}

#[test]
fn missing_file_surfaces_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = question_store_for(dir.path().join("missing.json").to_str().unwrap());

    let mut controller = controller_with_store(MemoryProgressStore::new(NAMESPACE), 60);
    let err = controller.initialize(store.as_ref()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(controller.phase(), SessionPhase::Loading);
    assert!(controller.surface().alerts[0].starts_with("Failed to load questions:"));
}
