//! Bulk actions over a page selection: accept/reject with a per-item
//! precondition check, and batched verifier assign/unassign.
//!
//! ORDERING
//! ========
//! Accept/reject runs strictly one id at a time (check, then PUT) so the
//! precondition read is consistent per item and backend load stays bounded.
//! A failing item never aborts the batch; only succeeded ids leave the set.

#[cfg(test)]
#[path = "bulk_test.rs"]
mod bulk_test;

use crate::api::{AssignmentApi, Resource, ReviewApi};
use crate::error::ApiError;
use crate::model::{ReviewStatus, Verifier};
use crate::selection::SelectionSet;

/// Status change applied by a bulk accept/reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Accept,
    Reject,
}

impl Transition {
    pub fn target(self) -> ReviewStatus {
        match self {
            Self::Accept => ReviewStatus::Accepted,
            Self::Reject => ReviewStatus::Rejected,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Accept => "accepted",
            Self::Reject => "rejected",
        }
    }

    /// Text for the blocking confirm dialog shown before the batch runs.
    pub fn confirm_prompt(self, count: usize, noun: &str) -> String {
        format!("Are you sure you want to {} {count} {noun}(s)?", self.verb())
    }
}

/// Refusals raised before any request is sent, plus batch-level API failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BulkError {
    #[error("Select at least one item first.")]
    EmptySelection,

    #[error("Select a verifier first.")]
    MissingVerifier,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Aggregate result of a sequential accept/reject batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub succeeded: Vec<String>,
    /// Ids whose current status failed the precondition.
    pub skipped: Vec<String>,
    /// Ids whose check or update request failed, with the error text.
    pub failed: Vec<(String, String)>,
}

impl BulkReport {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        !self.succeeded.is_empty()
    }

    /// Main toast text.
    pub fn message(&self, transition: Transition, noun: &str) -> String {
        if self.is_success() {
            format!("Successfully {} {} {noun}(s)", transition.past_tense(), self.succeeded.len())
        } else if self.failed.is_empty() {
            format!("No pending {noun}(s) to {}", transition.verb())
        } else {
            format!("Failed to {} any {noun}(s)", transition.verb())
        }
    }

    /// Secondary notice for skipped and failed items, if any.
    pub fn notice(&self, noun: &str) -> Option<String> {
        let mut parts = Vec::new();
        if !self.skipped.is_empty() {
            parts.push(format!("{} skipped (not pending)", self.skipped.len()));
        }
        if !self.failed.is_empty() {
            parts.push(format!("{} failed", self.failed.len()));
        }
        if parts.is_empty() {
            return None;
        }
        Some(format!("{} {noun}(s) not processed: {}", self.skipped.len() + self.failed.len(), parts.join(", ")))
    }
}

/// Accept or reject every selected id that is still `PENDING`.
///
/// Confirmation is the caller's job and must happen before this is called.
///
/// # Errors
///
/// Returns [`BulkError::EmptySelection`] when nothing is selected. Per-item
/// failures are recorded in the report instead.
pub async fn transition<A>(
    api: &A,
    resource: Resource,
    selection: &mut SelectionSet,
    transition: Transition,
) -> Result<BulkReport, BulkError>
where
    A: ReviewApi + ?Sized,
{
    let ids = selection.ids();
    if ids.is_empty() {
        return Err(BulkError::EmptySelection);
    }

    let mut report = BulkReport::default();
    for id in ids {
        match api.fetch_submission(resource, &id).await {
            Ok(current) if current.status != ReviewStatus::Pending => {
                tracing::debug!(%id, status = current.status.as_str(), "skipping item that is not pending");
                report.skipped.push(id);
                continue;
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%id, %error, "precondition check failed");
                report.failed.push((id, error.to_string()));
                continue;
            }
        }

        match api.update_status(resource, &id, transition.target()).await {
            Ok(()) => report.succeeded.push(id),
            Err(error) => {
                tracing::warn!(%id, %error, "status update failed");
                report.failed.push((id, error.to_string()));
            }
        }
    }

    selection.remove_all(&report.succeeded);
    tracing::debug!(
        succeeded = report.succeeded.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "bulk {} finished",
        transition.verb()
    );
    Ok(report)
}

/// Direction of a batched verifier link request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkAction {
    Assign,
    Unassign,
}

/// Outcome of a batched link request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReport {
    pub action: LinkAction,
    pub items: usize,
    /// `assignments_created` or `assignments_deleted` from the server.
    pub changed: u32,
    pub verifier_name: String,
}

impl LinkReport {
    pub fn message(&self, noun: &str) -> String {
        match self.action {
            LinkAction::Assign => format!(
                "Assigned {} {noun}(s) to {} ({} new link(s))",
                self.items, self.verifier_name, self.changed
            ),
            LinkAction::Unassign => format!(
                "Unassigned {} {noun}(s) from {} ({} link(s) removed)",
                self.items, self.verifier_name, self.changed
            ),
        }
    }
}

/// Link or unlink every selected id to the selected verifier in one request.
///
/// The verifier is read at call time, so a cleared secondary selection is
/// refused rather than acted on.
///
/// # Errors
///
/// Returns [`BulkError::EmptySelection`] or [`BulkError::MissingVerifier`]
/// before sending anything, or [`BulkError::Api`] when the request fails (the
/// selection is kept in that case).
pub async fn link<A>(
    api: &A,
    resource: Resource,
    selection: &mut SelectionSet,
    verifier: Option<&Verifier>,
    action: LinkAction,
) -> Result<LinkReport, BulkError>
where
    A: AssignmentApi + ?Sized,
{
    let ids = selection.ids();
    if ids.is_empty() {
        return Err(BulkError::EmptySelection);
    }
    let Some(verifier) = verifier else {
        return Err(BulkError::MissingVerifier);
    };

    let verifier_ids = [verifier.id.clone()];
    let changed = match action {
        LinkAction::Assign => api.bulk_assign(resource, &ids, &verifier_ids).await?,
        LinkAction::Unassign => api.bulk_unassign(resource, &ids, &verifier_ids).await?,
    };
    selection.clear_visible();

    Ok(LinkReport { action, items: ids.len(), changed, verifier_name: verifier.name.clone() })
}
