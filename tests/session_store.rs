#![allow(clippy::unwrap_used)]
//! Stored session contract tests.

mod common;

use common::CountingBackend;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use texlate::llm::{Completion, Message, RequestExecutor, Role};
use texlate::session::{Session, SessionStore, StoreError};

fn open_store(temp_dir: &TempDir) -> SessionStore {
    SessionStore::new(temp_dir.path().join("sessions"), "a careful reviewer").unwrap()
}

#[tokio::test]
async fn test_conversation_survives_writeback_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let executor = RequestExecutor::new(Arc::new(CountingBackend::default()), 0);

    let mut session = store.get("review").unwrap();
    assert_eq!(session.messages().len(), 1);

    let reply = session.ask(&executor, "Check section 2.").await;
    assert_eq!(reply, Completion::Reply("2 messages".to_string()));
    session.configure("strict");
    store.writeback(&session).unwrap();

    let reopened = open_store(&temp_dir);
    let mut loaded = reopened.get("review").unwrap();
    assert_eq!(loaded, session);

    // History carries into the next exchange.
    let reply = loaded.ask(&executor, "And section 3?").await;
    assert_eq!(reply, Completion::Reply("4 messages".to_string()));
}

#[tokio::test]
async fn test_history_stays_within_limit_across_many_asks() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let executor = RequestExecutor::new(Arc::new(CountingBackend::default()), 0);

    let mut session = store.get("short").unwrap();
    session.set_message_limit(3);
    for turn in 0..10 {
        session.ask(&executor, &format!("turn {turn}")).await;
        assert_eq!(session.messages()[0].role, Role::System);
        assert!(session.messages().len() - 1 <= 3 + 1);
    }

    store.writeback(&session).unwrap();
    let loaded = store.get("short").unwrap();
    assert_eq!(loaded.role_instruction(), "You are a careful reviewer.");
    assert_eq!(loaded.limit(), 3);
}

#[test]
fn test_missing_record_is_fresh_session_not_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let session = store.get("never-saved").unwrap();

    assert_eq!(session.id(), "never-saved");
    assert_eq!(
        session.messages(),
        &[Message::system("You are a careful reviewer.")]
    );
    assert!(!store.contains("never-saved").unwrap());
}

#[test]
fn test_corrupt_record_is_error_not_fresh_session() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    fs::write(store.record_path("broken").unwrap(), "{ not json").unwrap();

    let err = store.get("broken").unwrap_err();

    assert!(matches!(err, StoreError::Decode { .. }));
}

#[test]
fn test_record_without_system_instruction_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let record = r#"{
        "format": "texlate-session",
        "version": 1,
        "session": {
            "id": "bad",
            "messages": [{"role": "user", "content": "hi"}],
            "limit": 10
        }
    }"#;
    fs::write(store.record_path("bad").unwrap(), record).unwrap();

    assert!(matches!(
        store.get("bad").unwrap_err(),
        StoreError::Decode { .. }
    ));
}

#[test]
fn test_unknown_record_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let record = r#"{
        "format": "texlate-session",
        "version": 99,
        "session": {
            "id": "future",
            "messages": [{"role": "system", "content": "You are x."}],
            "limit": 10
        }
    }"#;
    fs::write(store.record_path("future").unwrap(), record).unwrap();

    assert!(matches!(
        store.get("future").unwrap_err(),
        StoreError::UnsupportedFormat { .. }
    ));
}

#[test]
fn test_set_role_leaves_only_new_instruction() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);
    let mut session = store.get("roles").unwrap();

    session.set_role("a LaTeX expert");
    store.writeback(&session).unwrap();

    assert_eq!(
        store.get("roles").unwrap().messages(),
        &[Message::system("You are a LaTeX expert.")]
    );
}

#[tokio::test]
async fn test_session_name_cannot_leave_the_store_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir);

    let err = store.get("../escaped").unwrap_err();
    assert!(matches!(err, StoreError::InvalidName { ref name } if name == "../escaped"));

    let executor = RequestExecutor::new(Arc::new(CountingBackend::default()), 0);
    let mut session = Session::new("../escaped", 4, "x");
    session.ask(&executor, "hello").await;
    assert!(matches!(
        store.writeback(&session),
        Err(StoreError::InvalidName { .. })
    ));
    assert!(!temp_dir.path().join("escaped.json").exists());

    assert!(matches!(store.get(""), Err(StoreError::InvalidName { .. })));
    assert!(!temp_dir.path().join("sessions").join(".json").exists());
}
