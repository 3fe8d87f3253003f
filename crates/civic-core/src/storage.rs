// Rust guideline compliant 2026-02-06

//! Storage interface for issues and their audit trail.
//!
//! A backend applies each [`Commit`] as one unit: the issue row and its
//! audit rows become visible together or not at all. Two backends exist:
//! [`MemoryBackend`] for ephemeral use and [`JsonlBackend`], a JSONL journal
//! rewritten atomically under a file lock.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlBackend;
pub use memory::MemoryBackend;

use crate::{Error, Issue, IssueUpdate, NewUpdate, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a commit writes its issue row.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueWrite {
    /// Insert a new issue; the store assigns its id.
    Insert(Issue),
    /// Replace an existing issue with the same id.
    Replace(Issue),
}

/// An issue mutation together with the audit entries describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Issue row to write.
    pub issue: IssueWrite,
    /// Audit entries to append, in order.
    pub updates: Vec<NewUpdate>,
    /// Mutation timestamp, becomes `updated_at` and each entry's `created_at`.
    pub at: DateTime<Utc>,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    /// The issue as stored.
    pub issue: Issue,
    /// The appended audit entries as stored.
    pub updates: Vec<IssueUpdate>,
}

/// Storage interface implemented by every backend.
pub trait StorageBackend: Send {
    /// Loads a single issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no issue has the id.
    fn get(&self, id: u64) -> Result<Issue>;

    /// Returns every stored issue in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn issues(&self) -> Result<Vec<Issue>>;

    /// Returns the audit trail of an issue ordered by (`created_at`, `id`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no issue has the id.
    fn updates(&self, issue_id: u64) -> Result<Vec<IssueUpdate>>;

    /// Applies a commit atomically.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the store unchanged if the commit is
    /// invalid or cannot be persisted.
    fn commit(&mut self, commit: Commit) -> Result<Committed>;

    /// Short backend name for logs.
    fn kind(&self) -> &'static str;
}

/// One line of the persistent journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalRecord {
    /// An issue row.
    Issue(Issue),
    /// An audit row.
    Update(IssueUpdate),
}

/// In-memory state shared by the backends.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    issues: BTreeMap<u64, Issue>,
    updates: Vec<IssueUpdate>,
    next_issue_id: u64,
    next_update_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger; the first issue gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: BTreeMap::new(),
            updates: Vec::new(),
            next_issue_id: 1,
            next_update_id: 1,
        }
    }

    /// Rebuilds a ledger from journal records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Corrupt` if ids repeat or an audit row references an
    /// unknown issue.
    pub fn from_records(records: Vec<JournalRecord>) -> Result<Self> {
        let mut ledger = Self::new();
        let mut pending_updates = Vec::new();

        for record in records {
            match record {
                JournalRecord::Issue(issue) => {
                    let id = issue.id;
                    if ledger.issues.insert(id, issue).is_some() {
                        return Err(Error::Corrupt(format!("duplicate issue id {id}")));
                    }
                    ledger.next_issue_id = ledger.next_issue_id.max(id + 1);
                }
                JournalRecord::Update(update) => pending_updates.push(update),
            }
        }

        for update in pending_updates {
            if !ledger.issues.contains_key(&update.issue_id) {
                return Err(Error::Corrupt(format!(
                    "update {} references unknown issue {}",
                    update.id, update.issue_id
                )));
            }
            if ledger.updates.iter().any(|u| u.id == update.id) {
                return Err(Error::Corrupt(format!("duplicate update id {}", update.id)));
            }
            ledger.next_update_id = ledger.next_update_id.max(update.id + 1);
            ledger.updates.push(update);
        }

        ledger.updates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(ledger)
    }

    /// Flattens the ledger into journal records, issues first.
    #[must_use]
    pub fn records(&self) -> Vec<JournalRecord> {
        self.issues
            .values()
            .cloned()
            .map(JournalRecord::Issue)
            .chain(self.updates.iter().cloned().map(JournalRecord::Update))
            .collect()
    }

    /// Loads a single issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no issue has the id.
    pub fn get(&self, id: u64) -> Result<Issue> {
        self.issues
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Returns every issue in id order.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.issues.values().cloned().collect()
    }

    /// Returns the audit trail of an issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no issue has the id.
    pub fn updates(&self, issue_id: u64) -> Result<Vec<IssueUpdate>> {
        if !self.issues.contains_key(&issue_id) {
            return Err(Error::NotFound(issue_id.to_string()));
        }
        let mut updates: Vec<IssueUpdate> = self
            .updates
            .iter()
            .filter(|u| u.issue_id == issue_id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(updates)
    }

    /// Applies a commit. Nothing changes unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A replaced issue does not exist
    /// - A replaced issue was read before its latest write (`Error::Conflict`)
    /// - The resulting issue fails validation
    /// - The commit carries no audit entry
    pub fn apply(&mut self, commit: Commit) -> Result<Committed> {
        if commit.updates.is_empty() {
            return Err(Error::Corrupt(
                "every issue mutation must append an audit entry".to_string(),
            ));
        }

        let mut issue = match commit.issue {
            IssueWrite::Insert(mut issue) => {
                issue.id = self.next_issue_id;
                issue.created_at = commit.at;
                issue
            }
            IssueWrite::Replace(issue) => {
                let existing = self
                    .issues
                    .get(&issue.id)
                    .ok_or_else(|| Error::NotFound(issue.id.to_string()))?;
                if existing.created_at != issue.created_at {
                    return Err(Error::Corrupt(format!(
                        "issue {} creation time cannot change",
                        issue.id
                    )));
                }
                if existing.updated_at != issue.updated_at {
                    return Err(Error::Conflict(format!(
                        "issue {} changed since it was read",
                        issue.id
                    )));
                }
                issue
            }
        };
        issue.updated_at = commit.at;
        issue.validate()?;

        let mut next_update_id = self.next_update_id;
        let updates: Vec<IssueUpdate> = commit
            .updates
            .into_iter()
            .map(|draft| {
                let update = draft.into_update(next_update_id, issue.id, commit.at);
                next_update_id += 1;
                update
            })
            .collect();

        if issue.id == self.next_issue_id {
            self.next_issue_id += 1;
        }
        self.next_update_id = next_update_id;
        self.issues.insert(issue.id, issue.clone());
        self.updates.extend(updates.iter().cloned());

        Ok(Committed { issue, updates })
    }
}
