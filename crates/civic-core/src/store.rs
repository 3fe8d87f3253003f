// Rust guideline compliant 2026-02-06

//! The issue store: the only owner of issue and audit records.
//!
//! All writes go through [`IssueStore`], which validates input, applies
//! catalog defaults and hands the backend one [`Commit`] per mutation.

use crate::models::non_blank;
use crate::query::{self, IssueFilter, Pagination};
use crate::storage::{Commit, Committed, IssueWrite, MemoryBackend, StorageBackend};
use crate::{Catalog, Error, Issue, IssueDraft, IssueUpdate, NewUpdate, Result, Status, ANONYMOUS};
use chrono::{DateTime, Duration, Utc};

/// Default cap on image references per issue.
pub const DEFAULT_MAX_IMAGES: usize = 3;

/// Message of the audit entry opening every issue.
pub const REPORTED_MESSAGE: &str = "Issue reported by citizen";

/// Attempts a mutation gets when another handle keeps writing its issue.
const MAX_COMMIT_ATTEMPTS: usize = 3;

/// Owned store instance over a storage backend and reference catalog.
pub struct IssueStore {
    backend: Box<dyn StorageBackend>,
    catalog: Catalog,
    max_images: usize,
}

impl std::fmt::Debug for IssueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueStore")
            .field("backend", &self.backend.kind())
            .field("max_images", &self.max_images)
            .finish()
    }
}

impl IssueStore {
    /// Creates a store over a backend.
    ///
    /// # Arguments
    ///
    /// * `backend` - Storage backend holding the records
    /// * `catalog` - Reference data used for defaults
    pub fn new(backend: Box<dyn StorageBackend>, catalog: Catalog) -> Self {
        Self {
            backend,
            catalog,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }

    /// Creates an in-memory store with the built-in catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()), Catalog::builtin())
    }

    /// Sets the maximum number of image references per issue.
    #[must_use]
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }

    /// Returns the reference catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the maximum number of image references per issue.
    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// Returns the backend name.
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// Creates an issue from a citizen submission.
    ///
    /// The issue starts as `reported`, takes its priority and department
    /// from the category unless overridden, and opens its audit trail with
    /// one `status_change` entry.
    ///
    /// # Arguments
    ///
    /// * `draft` - The submission
    /// * `now` - Creation timestamp
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the draft is incomplete or invalid.
    pub fn create(&mut self, draft: IssueDraft, now: DateTime<Utc>) -> Result<Committed> {
        draft.validate(self.max_images)?;

        let category_id = draft.category_id.trim().to_string();
        let category = self.catalog.category(&category_id);
        let priority = draft
            .priority
            .or_else(|| category.map(|c| c.priority))
            .unwrap_or_default();
        let department_id = category.map(|c| c.department_id.clone());
        let estimated_resolution_date = category
            .map(|c| {
                now.checked_add_signed(Duration::days(i64::from(c.estimated_resolution_days)))
                    .ok_or_else(|| {
                        Error::Validation(format!(
                            "Resolution target of {} days for category {} is out of range",
                            c.estimated_resolution_days, c.id
                        ))
                    })
            })
            .transpose()?;
        let reporter_id = non_blank(draft.reporter_id);
        let actor = reporter_id.clone().unwrap_or_else(|| ANONYMOUS.to_string());

        let issue = Issue {
            id: 0,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            category_id,
            status: Status::Reported,
            priority,
            location: draft.location,
            reporter_id,
            assigned_to: None,
            department_id,
            image_urls: draft.image_urls,
            created_at: now,
            updated_at: now,
            estimated_resolution_date,
            actual_resolution_date: None,
            citizen_rating: None,
            citizen_feedback: None,
        };

        self.commit(Commit {
            issue: IssueWrite::Insert(issue),
            updates: vec![NewUpdate::status_change(
                actor,
                None,
                Status::Reported,
                REPORTED_MESSAGE,
            )],
            at: now,
        })
    }

    /// Loads an issue by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no issue has the id.
    pub fn get(&self, id: u64) -> Result<Issue> {
        self.backend.get(id)
    }

    /// Lists issues matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn list(&self, filter: &IssueFilter, page: Pagination) -> Result<Vec<Issue>> {
        Ok(query::apply(self.backend.issues()?, filter, page))
    }

    /// Counts issues matching a filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn count(&self, filter: &IssueFilter) -> Result<usize> {
        Ok(self
            .backend
            .issues()?
            .iter()
            .filter(|issue| filter.matches(issue))
            .count())
    }

    /// Returns every issue in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn all(&self) -> Result<Vec<Issue>> {
        self.backend.issues()
    }

    /// Appends an audit entry and refreshes the issue's `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the issue is unknown, or
    /// `Error::Validation` if the message is blank.
    pub fn append_update(
        &mut self,
        issue_id: u64,
        update: NewUpdate,
        now: DateTime<Utc>,
    ) -> Result<IssueUpdate> {
        if update.message.trim().is_empty() {
            return Err(Error::Validation("message cannot be empty".to_string()));
        }

        let committed = self.with_retry(|store| {
            let issue = store.get(issue_id)?;
            store.commit(Commit {
                issue: IssueWrite::Replace(issue),
                updates: vec![update.clone()],
                at: now,
            })
        })?;
        committed
            .updates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Corrupt("commit returned no audit entry".to_string()))
    }

    /// Returns the audit trail of an issue, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the issue is unknown.
    pub fn updates(&self, issue_id: u64) -> Result<Vec<IssueUpdate>> {
        self.backend.updates(issue_id)
    }

    pub(crate) fn commit(&mut self, commit: Commit) -> Result<Committed> {
        self.backend.commit(commit)
    }

    /// Runs a read-validate-commit step, rerunning it on a write conflict.
    ///
    /// A conflicting commit leaves the backend holding the newer row, so the
    /// next attempt validates against it.
    pub(crate) fn with_retry<T>(
        &mut self,
        mut step: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            match step(self) {
                Err(Error::Conflict(reason)) if attempt < MAX_COMMIT_ATTEMPTS => {
                    tracing::debug!(attempt, %reason, "Retrying stale issue write");
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}
