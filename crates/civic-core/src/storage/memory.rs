// Rust guideline compliant 2026-02-06

//! Ephemeral in-memory backend.

use crate::storage::{Commit, Committed, Ledger, StorageBackend};
use crate::{Issue, IssueUpdate, Result};

/// Backend keeping the ledger in process memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    ledger: Ledger,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, id: u64) -> Result<Issue> {
        self.ledger.get(id)
    }

    fn issues(&self) -> Result<Vec<Issue>> {
        Ok(self.ledger.issues())
    }

    fn updates(&self, issue_id: u64) -> Result<Vec<IssueUpdate>> {
        self.ledger.updates(issue_id)
    }

    fn commit(&mut self, commit: Commit) -> Result<Committed> {
        self.ledger.apply(commit)
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
