//! Integration tests for backup export/import.
//!
//! These tests verify the complete workflow of exporting the store,
//! resetting it, and importing the document back in.

use chrono::Utc;
use devflow_core::{
    export_snapshot, import_snapshot, reset_all, suggested_file_name, BackupDocument, Command,
    CoreError, GoalCategory, SessionType, SnippetDraft, SnippetRegistry, Store,
};

fn populated_store() -> Store {
    let mut store = Store::in_memory();
    store
        .dispatch(Command::SetGithubUsername {
            username: "octocat".into(),
        })
        .unwrap();
    store
        .dispatch(Command::AddGoal {
            title: "Write tests".into(),
            category: GoalCategory::Code,
        })
        .unwrap();
    store
        .dispatch(Command::RecordSession {
            session_type: SessionType::Focus,
            duration_minutes: 25,
        })
        .unwrap();
    SnippetRegistry::new(&mut store)
        .create(SnippetDraft {
            title: "fib".into(),
            code: "fn fib(n: u64) -> u64 { todo!() }".into(),
            language: Some("rust".into()),
            tags_text: "math, recursion".into(),
        })
        .unwrap();
    store
}

#[test]
fn export_reset_import_round_trips() {
    let mut store = populated_store();
    let before = store.snapshot().clone();

    let exported = export_snapshot(&store, Utc::now()).to_json().unwrap();

    reset_all(&mut store).unwrap();
    assert!(store.snapshot().goals.is_empty());
    assert!(store.snapshot().github_username.is_empty());

    import_snapshot(&mut store, &exported).unwrap();
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn import_of_invalid_text_fails_and_leaves_store_unchanged() {
    let mut store = populated_store();
    let before = store.snapshot().clone();

    let result = import_snapshot(&mut store, "{ this is not json");
    assert!(matches!(result, Err(CoreError::Backup(_))));
    assert_eq!(store.snapshot(), &before);

    let result = import_snapshot(&mut store, "");
    assert!(result.is_err());
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn partial_document_falls_back_field_wise() {
    let mut store = populated_store();

    // An older backup knowing only about goals: everything else lands
    // on defaults, including the settings.
    import_snapshot(
        &mut store,
        r#"{"goals":[{"id":"g1","title":"carried","category":"learn","completed":false,"createdAt":"2026-08-01T08:00:00Z"}]}"#,
    )
    .unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.goals.len(), 1);
    assert_eq!(snap.goals[0].title, "carried");
    assert!(snap.github_username.is_empty());
    assert!(snap.snippets.is_empty());
    assert_eq!(snap.pomodoro_settings.focus_duration, 25);
}

#[test]
fn import_recaps_session_history() {
    let mut store = Store::in_memory();
    let mut doc = export_snapshot(&store, Utc::now());
    for i in 0..15u32 {
        doc.pomodoro_sessions.push(devflow_core::PomodoroSession::new(
            SessionType::Focus,
            i + 1,
            Utc::now(),
        ));
    }

    import_snapshot(&mut store, &doc.to_json().unwrap()).unwrap();
    assert_eq!(store.snapshot().pomodoro_sessions.len(), 10);
}

#[test]
fn exported_document_carries_version_and_timestamp() {
    let store = populated_store();
    let now = Utc::now();
    let doc = export_snapshot(&store, now);
    assert_eq!(doc.version, 1);
    assert_eq!(doc.exported_at, Some(now));

    let parsed = BackupDocument::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(parsed.version, 1);
    assert_eq!(parsed.github_username, "octocat");
}

#[test]
fn document_without_version_or_timestamp_still_parses() {
    let doc = BackupDocument::from_json(r#"{"githubUsername":"octocat"}"#).unwrap();
    assert_eq!(doc.version, 1);
    assert!(doc.exported_at.is_none());
}

#[test]
fn suggested_file_name_embeds_the_date() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
    assert_eq!(suggested_file_name(date), "devflow-backup-2026-08-05.json");
}
