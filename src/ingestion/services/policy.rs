//! Failure handling policy and handler outcomes.

use super::{IngestionError, IngestionResult};
use crate::ingestion::ports::ContentRepositoryError;

/// What a handler does after a store operation fails and the failure has
/// been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Return the failure to the caller.
    Propagate,
    /// Report [`IngestOutcome::StoreFailureLogged`] and carry on.
    LogAndContinue,
}

impl OnFailure {
    /// Applies the policy to a store failure.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::Repository`] for [`OnFailure::Propagate`].
    pub fn resolve(self, err: ContentRepositoryError) -> IngestionResult<IngestOutcome> {
        match self {
            Self::Propagate => Err(IngestionError::Repository(err)),
            Self::LogAndContinue => Ok(IngestOutcome::StoreFailureLogged),
        }
    }
}

/// Per-operation failure policy for the ingestion handlers.
///
/// The default propagates issue creation and comment update failures and
/// absorbs comment creation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    create_issue: OnFailure,
    create_comment: OnFailure,
    update_comment: OnFailure,
}

impl FailurePolicy {
    /// Creates a policy with an explicit choice for every operation.
    #[must_use]
    pub const fn new(
        create_issue: OnFailure,
        create_comment: OnFailure,
        update_comment: OnFailure,
    ) -> Self {
        Self {
            create_issue,
            create_comment,
            update_comment,
        }
    }

    /// Sets the issue creation policy.
    #[must_use]
    pub const fn with_create_issue(mut self, on_failure: OnFailure) -> Self {
        self.create_issue = on_failure;
        self
    }

    /// Sets the comment creation policy.
    #[must_use]
    pub const fn with_create_comment(mut self, on_failure: OnFailure) -> Self {
        self.create_comment = on_failure;
        self
    }

    /// Sets the comment update policy.
    #[must_use]
    pub const fn with_update_comment(mut self, on_failure: OnFailure) -> Self {
        self.update_comment = on_failure;
        self
    }

    /// Returns the issue creation policy.
    #[must_use]
    pub const fn create_issue(self) -> OnFailure {
        self.create_issue
    }

    /// Returns the comment creation policy.
    #[must_use]
    pub const fn create_comment(self) -> OnFailure {
        self.create_comment
    }

    /// Returns the comment update policy.
    #[must_use]
    pub const fn update_comment(self) -> OnFailure {
        self.update_comment
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::new(
            OnFailure::Propagate,
            OnFailure::LogAndContinue,
            OnFailure::Propagate,
        )
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The record was written.
    Stored,
    /// A precondition failed; nothing was written.
    Dropped(DropReason),
    /// The store failed and the failure policy absorbed the error.
    StoreFailureLogged,
}

/// Precondition that caused an event to be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The issue lacked a body or a title, or one of them was blank after
    /// normalization.
    EmptyIssue,
    /// The comment body was missing or blank.
    EmptyComment,
    /// The comment belongs to a pull request.
    PullRequestComment,
    /// A node identifier in the payload was blank.
    InvalidNodeId,
    /// The parent issue was missing and could not be created from the event.
    ParentIssueUnavailable,
}

/// State of a comment's parent issue after [`ensure_issue_exists`] runs.
///
/// [`ensure_issue_exists`]: super::IssueIngestionService::ensure_issue_exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentIssue {
    /// The issue was already stored.
    Existing,
    /// The issue was created from the event.
    Created,
    /// The issue was missing and the event could not produce it.
    Unavailable(DropReason),
}
