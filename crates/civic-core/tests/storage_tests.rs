// Rust guideline compliant 2026-02-06

//! Unit tests for the storage backends.
//!
//! These tests validate journal persistence, reload, and error conditions.

use chrono::{DateTime, TimeZone, Utc};
use civic_core::storage::{Commit, IssueWrite, JournalRecord, Ledger};
use civic_core::{
    Catalog, Error, IssueDraft, IssueStore, JsonlBackend, NewUpdate, Status, StorageBackend,
    TransitionRequest, UpdateType,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 8, minute, 0).unwrap()
}

fn open_store(path: &Path) -> IssueStore {
    let backend = JsonlBackend::open(path.to_path_buf()).expect("Failed to open journal");
    IssueStore::new(Box::new(backend), Catalog::builtin())
}

#[test]
fn test_missing_journal_is_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let backend = JsonlBackend::open(temp_dir.path().join("civic.jsonl")).unwrap();
    assert!(backend.issues().unwrap().is_empty());
    assert!(!temp_dir.path().join("civic.jsonl").exists());
}

#[test]
fn test_empty_path_rejected() {
    assert!(JsonlBackend::open(Default::default()).is_err());
}

#[test]
fn test_reload_restores_state() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let (issue, updates) = {
        let mut store = open_store(&path);
        let id = store
            .create(IssueDraft::new("Leak", "Burst pipe", "water-main"), at(0))
            .unwrap()
            .issue
            .id;
        store
            .transition(TransitionRequest::new(id, Status::Acknowledged, "staff"), at(1))
            .unwrap();
        store.add_comment(id, "staff", "On site", false, at(2)).unwrap();
        (store.get(id).unwrap(), store.updates(id).unwrap())
    };

    let reopened = open_store(&path);
    assert_eq!(reopened.get(issue.id).unwrap(), issue);
    assert_eq!(reopened.updates(issue.id).unwrap(), updates);
    assert_eq!(updates.len(), 3);
}

#[test]
fn test_ids_continue_after_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    {
        let mut store = open_store(&path);
        store
            .create(IssueDraft::new("One", "First", "graffiti"), at(0))
            .unwrap();
        store
            .create(IssueDraft::new("Two", "Second", "graffiti"), at(1))
            .unwrap();
    }

    let mut store = open_store(&path);
    let third = store
        .create(IssueDraft::new("Three", "Third", "graffiti"), at(2))
        .unwrap();
    assert_eq!(third.issue.id, 3);
    assert_eq!(third.updates[0].id, 3);
}

#[test]
fn test_concurrent_handles_see_each_other() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut first = open_store(&path);
    let mut second = open_store(&path);

    first
        .create(IssueDraft::new("A", "From first", "trash"), at(0))
        .unwrap();
    let from_second = second
        .create(IssueDraft::new("B", "From second", "trash"), at(1))
        .unwrap();

    assert_eq!(from_second.issue.id, 2, "Second handle reloads before commit");
    assert_eq!(open_store(&path).all().unwrap().len(), 2);
}

fn status_trail(store: &IssueStore, id: u64) -> Vec<(Option<Status>, Option<Status>)> {
    store
        .updates(id)
        .unwrap()
        .into_iter()
        .filter(|u| u.update_type == UpdateType::StatusChange)
        .map(|u| (u.old_status, u.new_status))
        .collect()
}

#[test]
fn test_stale_handle_transition_checked_against_journal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut stale = open_store(&path);
    let id = stale
        .create(IssueDraft::new("Signal", "Stuck on red", "traffic-light"), at(0))
        .unwrap()
        .issue
        .id;

    let mut other = open_store(&path);
    other
        .transition(TransitionRequest::new(id, Status::Rejected, "staff"), at(1))
        .unwrap();

    let err = stale
        .transition(TransitionRequest::new(id, Status::Acknowledged, "staff"), at(2))
        .unwrap_err();
    assert!(
        matches!(
            err,
            Error::InvalidTransition {
                from: Status::Rejected,
                to: Status::Acknowledged
            }
        ),
        "{err}"
    );
    assert_eq!(stale.get(id).unwrap().status, Status::Rejected);

    let fresh = open_store(&path);
    assert_eq!(fresh.get(id).unwrap().status, Status::Rejected);
    assert_eq!(
        status_trail(&fresh, id),
        vec![
            (None, Some(Status::Reported)),
            (Some(Status::Reported), Some(Status::Rejected)),
        ]
    );
}

#[test]
fn test_stale_handle_comment_keeps_newer_row() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut stale = open_store(&path);
    let id = stale
        .create(IssueDraft::new("Leak", "Burst pipe", "water-main"), at(0))
        .unwrap()
        .issue
        .id;

    let mut other = open_store(&path);
    other
        .transition(TransitionRequest::new(id, Status::Acknowledged, "staff"), at(1))
        .unwrap();
    other
        .assign(id, "staff", Some("crew-7".to_string()), None, at(2))
        .unwrap();

    stale.add_comment(id, "citizen", "Still leaking", true, at(3)).unwrap();

    let fresh = open_store(&path);
    let issue = fresh.get(id).unwrap();
    assert_eq!(issue.status, Status::Acknowledged);
    assert_eq!(issue.assigned_to.as_deref(), Some("crew-7"));
    assert_eq!(issue.updated_at, at(3));
    let trail = fresh.updates(id).unwrap();
    assert_eq!(trail.len(), 4);
    assert_eq!(trail[3].update_type, UpdateType::Comment);
    assert_eq!(
        status_trail(&fresh, id).last().and_then(|(_, new)| *new),
        Some(issue.status)
    );
}

#[test]
fn test_ledger_rejects_replace_of_outdated_row() {
    let mut store = IssueStore::in_memory();
    let committed = store
        .create(IssueDraft::new("Lamp", "Dark", "streetlight"), at(0))
        .unwrap();
    let mut ledger = Ledger::from_records(vec![
        JournalRecord::Issue(committed.issue.clone()),
        JournalRecord::Update(committed.updates[0].clone()),
    ])
    .unwrap();
    let base = committed.issue;

    ledger
        .apply(Commit {
            issue: IssueWrite::Replace(base.clone()),
            updates: vec![NewUpdate::comment("staff", "First")],
            at: at(1),
        })
        .unwrap();
    let result = ledger.apply(Commit {
        issue: IssueWrite::Replace(base.clone()),
        updates: vec![NewUpdate::comment("staff", "Second")],
        at: at(2),
    });

    assert!(matches!(result, Err(Error::Conflict(_))));
    assert_eq!(ledger.get(base.id).unwrap().updated_at, at(1));
    assert_eq!(ledger.updates(base.id).unwrap().len(), 2);
}

#[test]
fn test_malformed_lines_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    {
        let mut store = open_store(&path);
        store
            .create(IssueDraft::new("Kept", "Survives", "sewer"), at(0))
            .unwrap();
    }
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("{ not json\n\n");
    fs::write(&path, content).unwrap();

    let store = open_store(&path);
    assert_eq!(store.all().unwrap().len(), 1);
}

#[test]
fn test_dangling_update_is_corrupt() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut store = IssueStore::in_memory();
    let committed = store
        .create(IssueDraft::new("Orphan", "No parent", "sewer"), at(0))
        .unwrap();
    let line = serde_json::to_string(&JournalRecord::Update(committed.updates[0].clone())).unwrap();
    fs::write(&path, format!("{line}\n")).unwrap();

    assert!(matches!(
        JsonlBackend::open(path),
        Err(Error::Corrupt(_))
    ));
}

#[test]
fn test_failed_commit_leaves_journal_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut store = open_store(&path);
    let id = store
        .create(IssueDraft::new("Lamp", "Dark", "streetlight"), at(0))
        .unwrap()
        .issue
        .id;
    let before = fs::read_to_string(&path).unwrap();

    assert!(store
        .transition(TransitionRequest::new(id, Status::Closed, "staff"), at(1))
        .is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert!(!temp_dir.path().join("civic.jsonl.tmp").exists());
}

#[test]
fn test_journal_lines_are_tagged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("civic.jsonl");

    let mut store = open_store(&path);
    store
        .create(IssueDraft::new("Lamp", "Dark", "streetlight"), at(0))
        .unwrap();

    let kinds: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["issue", "update"]);
}

#[test]
fn test_ledger_rejects_duplicate_issue_ids() {
    let mut store = IssueStore::in_memory();
    let issue = store
        .create(IssueDraft::new("Twice", "Dup", "trash"), at(0))
        .unwrap()
        .issue;
    let records = vec![
        JournalRecord::Issue(issue.clone()),
        JournalRecord::Issue(issue),
    ];
    assert!(matches!(
        Ledger::from_records(records),
        Err(Error::Corrupt(_))
    ));
}
