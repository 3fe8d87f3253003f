// Rust guideline compliant 2026-02-06

//! Finite State Machine module for issue status transitions.
//!
//! The lifecycle permits exactly these edges:
//!
//! - Reported → Acknowledged → InProgress → Resolved → Closed
//! - Reported → Rejected
//! - Acknowledged → Rejected
//! - InProgress → Rejected
//!
//! Resolved, Closed and Rejected are logical end states; issues are never
//! deleted.

use crate::{Error, Issue, Result, Status};

impl Status {
    /// Checks if a transition to the target status is valid.
    ///
    /// # Arguments
    ///
    /// * `target` - The target status to transition to
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTransition` if the edge is not part of the
    /// lifecycle, including self-transitions.
    pub fn can_transition_to(&self, target: Status) -> Result<()> {
        if self.valid_transitions().contains(&target) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Returns the list of valid target states for the current status.
    pub fn valid_transitions(&self) -> Vec<Status> {
        match self {
            Status::Reported => vec![Status::Acknowledged, Status::Rejected],
            Status::Acknowledged => vec![Status::InProgress, Status::Rejected],
            Status::InProgress => vec![Status::Resolved, Status::Rejected],
            Status::Resolved => vec![Status::Closed],
            Status::Closed | Status::Rejected => Vec::new(),
        }
    }
}

/// Validates a state transition for an issue.
///
/// # Errors
///
/// Returns an error if the transition violates the lifecycle.
pub fn validate_transition(issue: &Issue, new_status: Status) -> Result<()> {
    issue.status.can_transition_to(new_status)
}
