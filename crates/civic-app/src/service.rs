// Rust guideline compliant 2026-02-09

//! The issue service: single-writer access to the store.
//!
//! Every operation takes the store lock once. Mutations read, validate and
//! commit inside that one acquisition, then publish an event. Reads clone
//! what they need and release the lock before projecting.

use crate::error::Result;
use crate::events::{EventKind, EventSink, IssueEvent, NoopSink};
use crate::list::ListOptions;
use crate::requests::{AssignRequest, CommentRequest, FeedbackRequest, PatchRequest, StatusChangeRequest};
use crate::time::{Clock, SystemClock};
use civic_core::projection::{self, IssueDetail, IssueView};
use civic_core::storage::Committed;
use civic_core::{
    stats, Catalog, Department, Error, IssueCategory, IssueDraft, IssueStore, IssueUpdate, Stats,
    TransitionRequest,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe facade over an [`IssueStore`].
pub struct IssueService {
    store: Mutex<IssueStore>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for IssueService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl IssueService {
    /// Creates a service over a store, with no event sink and the wall clock.
    #[must_use]
    pub fn new(store: IssueStore) -> Self {
        Self {
            store: Mutex::new(store),
            events: Arc::new(NoopSink),
            clock: Arc::new(SystemClock),
        }
    }

    /// Publishes committed changes to `sink`.
    #[must_use]
    pub fn with_events(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Uses `clock` for every timestamp.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // Store mutations are all-or-nothing, so a panic elsewhere cannot leave
    // the store half-written.
    fn store(&self) -> MutexGuard<'_, IssueStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the storage backend name.
    pub fn backend_kind(&self) -> &'static str {
        self.store().backend_kind()
    }

    /// Returns a copy of the reference catalog.
    pub fn catalog(&self) -> Catalog {
        self.store().catalog().clone()
    }

    /// Active departments sorted by name.
    pub fn departments(&self) -> Vec<Department> {
        self.store()
            .catalog()
            .active_departments()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Active categories sorted by name.
    pub fn categories(&self) -> Vec<IssueCategory> {
        self.store()
            .catalog()
            .active_categories()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Reports a new issue.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the draft is incomplete.
    pub fn create(&self, draft: IssueDraft) -> Result<IssueView> {
        let now = self.clock.now();
        let mut store = self.store();
        let committed = store.create(draft, now)?;
        tracing::info!(
            issue_id = committed.issue.id,
            category = %committed.issue.category_id,
            "Issue reported"
        );
        Ok(self.finish(&store, EventKind::Created, committed))
    }

    /// Loads an issue with its audit trail.
    ///
    /// # Arguments
    ///
    /// * `id` - Issue id
    /// * `public_only` - Drop audit entries hidden from citizens
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the issue is unknown.
    pub fn get(&self, id: u64, public_only: bool) -> Result<IssueDetail> {
        let (issue, updates, catalog) = {
            let store = self.store();
            (store.get(id)?, store.updates(id)?, store.catalog().clone())
        };
        Ok(projection::detail(
            issue,
            updates,
            public_only,
            &catalog,
            self.clock.now(),
        ))
    }

    /// Lists issues, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn list(&self, options: &ListOptions) -> Result<Vec<IssueView>> {
        let (filter, page) = options.to_query()?;
        let (issues, catalog) = {
            let store = self.store();
            (store.list(&filter, page)?, store.catalog().clone())
        };
        Ok(projection::project_all(issues, &catalog, self.clock.now()))
    }

    /// Counts issues matching the options, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn count(&self, options: &ListOptions) -> Result<usize> {
        let (filter, _) = options.to_query()?;
        Ok(self.store().count(&filter)?)
    }

    /// Returns the audit trail of an issue, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the issue is unknown.
    pub fn updates(&self, id: u64, public_only: bool) -> Result<Vec<IssueUpdate>> {
        let mut updates = self.store().updates(id)?;
        if public_only {
            updates.retain(|u| u.is_public);
        }
        Ok(updates)
    }

    /// Moves an issue along its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is unknown or the edge is illegal.
    pub fn transition(&self, id: u64, request: StatusChangeRequest) -> Result<IssueView> {
        let now = self.clock.now();
        let mut transition = TransitionRequest::new(id, request.status, request.user_id);
        transition.message = request.message;

        let mut store = self.store();
        let committed = match store.transition(transition, now) {
            Ok(committed) => committed,
            Err(err) => {
                log_rejection(id, &err);
                return Err(err.into());
            }
        };
        Ok(self.finish(&store, EventKind::StatusChanged, committed))
    }

    /// Adds a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is unknown or the message is blank.
    pub fn add_comment(&self, id: u64, request: CommentRequest) -> Result<IssueUpdate> {
        let now = self.clock.now();
        let mut store = self.store();
        let committed = store.add_comment(
            id,
            &request.user_id,
            &request.message,
            request.is_public,
            now,
        )?;
        let update = committed.updates.first().cloned().ok_or_else(|| {
            Error::Corrupt(format!("comment on issue {id} produced no audit entry"))
        })?;
        self.finish(&store, EventKind::Commented, committed);
        Ok(update)
    }

    /// Assigns an issue and/or routes it to a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue or department is unknown.
    pub fn assign(&self, id: u64, request: AssignRequest) -> Result<IssueView> {
        let now = self.clock.now();
        let mut store = self.store();
        let committed = store.assign(
            id,
            &request.user_id,
            request.assigned_to,
            request.department_id,
            now,
        )?;
        Ok(self.finish(&store, EventKind::Assigned, committed))
    }

    /// Records citizen feedback on a resolved or closed issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is not resolved or closed, or the
    /// rating is out of range.
    pub fn submit_feedback(&self, id: u64, request: FeedbackRequest) -> Result<IssueView> {
        let now = self.clock.now();
        let mut store = self.store();
        let committed = match store.submit_feedback(
            id,
            &request.user_id,
            request.rating,
            request.feedback,
            now,
        ) {
            Ok(committed) => committed,
            Err(err) => {
                log_rejection(id, &err);
                return Err(err.into());
            }
        };
        Ok(self.finish(&store, EventKind::Feedback, committed))
    }

    /// Applies a partial update atomically.
    ///
    /// # Errors
    ///
    /// Returns an error, changing nothing, if any part of the patch fails.
    pub fn patch(&self, id: u64, request: PatchRequest) -> Result<IssueView> {
        let now = self.clock.now();
        let mut store = self.store();
        let committed = match store.patch(id, &request.user_id, request.patch, now) {
            Ok(committed) => committed,
            Err(err) => {
                log_rejection(id, &err);
                return Err(err.into());
            }
        };
        Ok(self.finish(&store, EventKind::Updated, committed))
    }

    /// Computes dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn stats(&self) -> Result<Stats> {
        let (issues, catalog) = {
            let store = self.store();
            (store.all()?, store.catalog().clone())
        };
        Ok(stats::compute(&issues, &catalog))
    }

    /// Logs and publishes a commit, then projects the issue.
    fn finish(&self, store: &IssueStore, kind: EventKind, committed: Committed) -> IssueView {
        let Committed { issue, updates } = committed;
        if !updates.is_empty() {
            tracing::info!(
                issue_id = issue.id,
                status = %issue.status,
                entries = updates.len(),
                kind = kind.as_str(),
                "Committed issue change"
            );
            self.events.publish(IssueEvent {
                kind,
                issue_id: issue.id,
                status: issue.status,
                updates,
                at: issue.updated_at,
            });
        }
        projection::project(issue, store.catalog(), self.clock.now())
    }
}

fn log_rejection(issue_id: u64, err: &Error) {
    match err {
        Error::InvalidTransition { from, to } => {
            tracing::warn!(issue_id, from = %from, to = %to, "Rejected status transition");
        }
        Error::InvalidState { status, reason } => {
            tracing::warn!(issue_id, status = %status, reason = %reason, "Rejected operation");
        }
        Error::Conflict(reason) => {
            tracing::warn!(issue_id, reason = %reason, "Gave up on contended issue write");
        }
        _ => {}
    }
}
