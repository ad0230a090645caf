//! Service layer for issue ingestion and the parent-issue invariant.

use super::{DropReason, FailurePolicy, IngestOutcome, IngestionResult, ParentIssue};
use crate::ingestion::{
    domain::{
        Delivery, IssueNodeId, IssueOpenedEvent, IssuePayload, IssueRecord, Markdown,
        RedactionPolicy, Visibility, assemble_issue_markdown,
    },
    ports::ContentRepository,
};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{error, info};

/// Issue ingestion orchestration service.
#[derive(Clone)]
pub struct IssueIngestionService<R>
where
    R: ContentRepository,
{
    repository: Arc<R>,
    redaction: RedactionPolicy,
    failure_policy: FailurePolicy,
}

impl<R> IssueIngestionService<R>
where
    R: ContentRepository,
{
    /// Creates a new issue ingestion service with the default failure policy.
    #[must_use]
    pub fn new(repository: Arc<R>, redaction: RedactionPolicy) -> Self {
        Self {
            repository,
            redaction,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Replaces the failure policy.
    #[must_use]
    pub const fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Handles an `issues.opened` delivery.
    ///
    /// Issues without any content are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`super::IngestionError::Repository`] when the store rejects
    /// the issue and the issue creation policy is [`super::OnFailure::Propagate`].
    #[tracing::instrument(skip_all, fields(issue_id = %delivery.event().issue.node_id))]
    pub async fn ingest_opened(
        &self,
        delivery: &Delivery<IssueOpenedEvent>,
    ) -> IngestionResult<IngestOutcome> {
        let event = delivery.event();
        let visibility = event.repository.visibility();
        let record = match self.build_record(&event.issue, visibility, delivery.snapshot()) {
            Ok(record) => record,
            Err(reason) => return Ok(IngestOutcome::Dropped(reason)),
        };

        match self.repository.create_issue(&record).await {
            Ok(()) => {
                info!(outcome = "ok", issue_id = %record.id(), "successfully created issue");
                Ok(IngestOutcome::Stored)
            }
            Err(err) => {
                error!(
                    issue_id = %record.id(),
                    error = %err,
                    issue = ?event.issue,
                    "error creating issue"
                );
                self.failure_policy.create_issue().resolve(err)
            }
        }
    }

    /// Makes sure the issue a comment belongs to is stored.
    ///
    /// Looks the issue up and, when it is missing, creates it from `issue`
    /// with the same normalization and redaction as [`Self::ingest_opened`].
    /// Calling this repeatedly for the same issue creates it at most once.
    ///
    /// # Errors
    ///
    /// Returns [`super::IngestionError::Repository`] when the lookup or the
    /// creation fails, regardless of the configured failure policy.
    pub async fn ensure_issue_exists(
        &self,
        issue: &IssuePayload,
        visibility: Visibility,
        snapshot: &Value,
    ) -> IngestionResult<ParentIssue> {
        let Ok(issue_id) = IssueNodeId::new(issue.node_id.as_str()) else {
            error!("parent issue node id is empty");
            return Ok(ParentIssue::Unavailable(DropReason::InvalidNodeId));
        };
        if self.repository.find_issue(&issue_id).await?.is_some() {
            return Ok(ParentIssue::Existing);
        }

        info!(issue_id = %issue_id, "parent issue not found, creating new issue");
        let record = match self.build_record(issue, visibility, snapshot) {
            Ok(record) => record,
            Err(reason) => return Ok(ParentIssue::Unavailable(reason)),
        };
        if let Err(err) = self.repository.create_issue(&record).await {
            error!(issue_id = %issue_id, error = %err, issue = ?issue, "error creating issue");
            return Err(err.into());
        }
        info!(outcome = "ok", issue_id = %issue_id, "successfully created issue");
        Ok(ParentIssue::Created)
    }

    fn build_record(
        &self,
        issue: &IssuePayload,
        visibility: Visibility,
        snapshot: &Value,
    ) -> Result<IssueRecord, DropReason> {
        let Ok(id) = IssueNodeId::new(issue.node_id.as_str()) else {
            error!("issue node id is empty");
            return Err(DropReason::InvalidNodeId);
        };
        let title = issue.title.as_deref().unwrap_or_default();
        let body = issue.body.as_deref().unwrap_or_default();
        let Some(assembled) = assemble_issue_markdown(body, title) else {
            error!(issue_id = %id, issue = ?issue, "issue title or body is empty");
            return Err(DropReason::EmptyIssue);
        };

        let text = match self.redaction.redact(&assembled, Some(title), visibility) {
            Cow::Borrowed(unredacted) => unredacted.to_owned(),
            Cow::Owned(redacted) => {
                info!(issue_id = %id, "content redacted due to private repository setting");
                redacted
            }
        };
        let Ok(markdown) = Markdown::new(text) else {
            error!(issue_id = %id, issue = ?issue, "issue body is empty");
            return Err(DropReason::EmptyIssue);
        };

        Ok(IssueRecord::new(
            id,
            issue.author_id(),
            visibility,
            markdown,
            snapshot.clone(),
        ))
    }
}
