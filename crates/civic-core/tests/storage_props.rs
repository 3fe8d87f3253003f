// Rust guideline compliant 2026-02-06

//! Property-based tests for the storage backends.

use chrono::{DateTime, Duration, TimeZone, Utc};
use civic_core::{
    Catalog, IssueDraft, IssueStore, JsonlBackend, Status, TransitionRequest, UpdateType,
};
use proptest::prelude::*;
use tempfile::TempDir;

#[derive(Debug, Clone)]
enum Op {
    Create(usize),
    Transition(u64, Status),
    Comment(u64, bool),
}

const CATEGORIES: [&str; 4] = ["pothole", "graffiti", "sewer", "trash"];

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CATEGORIES.len()).prop_map(Op::Create),
        (1u64..6, arb_status()).prop_map(|(id, s)| Op::Transition(id, s)),
        (1u64..6, any::<bool>()).prop_map(|(id, p)| Op::Comment(id, p)),
    ]
}

fn run(store: &mut IssueStore, ops: &[Op], start: DateTime<Utc>) {
    for (step, op) in ops.iter().enumerate() {
        let now = start + Duration::seconds(step as i64);
        // Rejections are part of the workload.
        let _ = match op {
            Op::Create(c) => store
                .create(IssueDraft::new("Issue", "Details", CATEGORIES[*c]), now)
                .map(|_| ()),
            Op::Transition(id, status) => store
                .transition(TransitionRequest::new(*id, *status, "staff"), now)
                .map(|_| ()),
            Op::Comment(id, public) => store
                .add_comment(*id, "staff", "note", *public, now)
                .map(|_| ()),
        };
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The journal backend and the memory backend agree on every issue and
    /// audit trail, and a reload of the journal reproduces the same state.
    #[test]
    fn prop_journal_replay_matches_memory(ops in prop::collection::vec(arb_op(), 1..30)) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("civic.jsonl");

        let mut memory = IssueStore::in_memory();
        run(&mut memory, &ops, start);

        {
            let backend = JsonlBackend::open(path.clone()).unwrap();
            let mut journal = IssueStore::new(Box::new(backend), Catalog::builtin());
            run(&mut journal, &ops, start);
        }

        let backend = JsonlBackend::open(path).unwrap();
        let reloaded = IssueStore::new(Box::new(backend), Catalog::builtin());

        let issues = memory.all().unwrap();
        prop_assert_eq!(&reloaded.all().unwrap(), &issues);
        for issue in &issues {
            prop_assert_eq!(reloaded.updates(issue.id).unwrap(), memory.updates(issue.id).unwrap());
        }
    }

    /// Every issue's trail opens with `reported`, and replaying its status
    /// changes in order lands on the issue's current status.
    #[test]
    fn prop_trail_replays_to_current_status(ops in prop::collection::vec(arb_op(), 1..40)) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut store = IssueStore::in_memory();
        run(&mut store, &ops, start);

        for issue in store.all().unwrap() {
            let updates = store.updates(issue.id).unwrap();
            prop_assert!(!updates.is_empty());
            prop_assert_eq!(updates[0].new_status, Some(Status::Reported));
            prop_assert_eq!(updates[0].old_status, None);

            let mut status = Status::Reported;
            for update in updates.iter().skip(1) {
                if update.update_type == UpdateType::StatusChange {
                    prop_assert_eq!(update.old_status, Some(status));
                    let next = update.new_status.unwrap();
                    prop_assert!(status.can_transition_to(next).is_ok());
                    status = next;
                }
            }
            prop_assert_eq!(status, issue.status);
            prop_assert!(issue.updated_at >= issue.created_at);
            prop_assert_eq!(issue.updated_at, updates.last().unwrap().created_at);
        }
    }
}
