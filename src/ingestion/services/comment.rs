//! Service layer for comment creation and edits.

use super::{
    DropReason, FailurePolicy, IngestOutcome, IngestionResult, IssueIngestionService, ParentIssue,
};
use crate::ingestion::{
    domain::{
        CommentNodeId, CommentRecord, Delivery, IssueCommentEvent, IssueNodeId, Markdown,
        RedactionPolicy,
    },
    ports::ContentRepository,
};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{error, info, trace};

/// Comment ingestion orchestration service.
///
/// Owns an [`IssueIngestionService`] over the same repository so a comment's
/// parent issue can be created on demand.
#[derive(Clone)]
pub struct CommentIngestionService<R>
where
    R: ContentRepository,
{
    repository: Arc<R>,
    issues: IssueIngestionService<R>,
    redaction: RedactionPolicy,
    failure_policy: FailurePolicy,
}

impl<R> CommentIngestionService<R>
where
    R: ContentRepository,
{
    /// Creates a new comment ingestion service with the default failure
    /// policy.
    #[must_use]
    pub fn new(repository: Arc<R>, redaction: RedactionPolicy) -> Self {
        let issues = IssueIngestionService::new(Arc::clone(&repository), redaction);
        Self {
            repository,
            issues,
            redaction,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Replaces the failure policy, including the one used for parent issues.
    #[must_use]
    pub fn with_failure_policy(self, failure_policy: FailurePolicy) -> Self {
        Self {
            issues: self.issues.with_failure_policy(failure_policy),
            failure_policy,
            ..self
        }
    }

    /// Handles an `issue_comment.created` delivery.
    ///
    /// Empty comments and pull request comments are logged and dropped. The
    /// parent issue is created first when it is not stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`super::IngestionError::Repository`] when the parent issue
    /// cannot be looked up or created, or when the comment creation policy is
    /// [`super::OnFailure::Propagate`] and the store rejects the comment.
    #[tracing::instrument(skip_all, fields(comment_id = %delivery.event().comment.node_id))]
    pub async fn ingest_created(
        &self,
        delivery: &Delivery<IssueCommentEvent>,
    ) -> IngestionResult<IngestOutcome> {
        let event = delivery.event();
        let visibility = event.repository.visibility();

        let Some(body) = event
            .comment
            .body
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        else {
            error!("comment body is empty");
            return Ok(IngestOutcome::Dropped(DropReason::EmptyComment));
        };
        if event.issue.is_pull_request() {
            error!("comment is on a pull request");
            return Ok(IngestOutcome::Dropped(DropReason::PullRequestComment));
        }
        let (Ok(id), Ok(issue_id)) = (
            CommentNodeId::new(event.comment.node_id.as_str()),
            IssueNodeId::new(event.issue.node_id.as_str()),
        ) else {
            error!("comment or issue node id is empty");
            return Ok(IngestOutcome::Dropped(DropReason::InvalidNodeId));
        };

        let text = match self.redaction.redact(body, None, visibility) {
            Cow::Borrowed(unredacted) => unredacted.to_owned(),
            Cow::Owned(redacted) => {
                info!(comment_id = %id, "content redacted due to private repository setting");
                redacted
            }
        };
        let Ok(markdown) = Markdown::new(text) else {
            error!(comment_id = %id, "comment body is empty");
            return Ok(IngestOutcome::Dropped(DropReason::EmptyComment));
        };

        let parent = self
            .issues
            .ensure_issue_exists(&event.issue, visibility, delivery.snapshot())
            .await?;
        if let ParentIssue::Unavailable(reason) = parent {
            error!(
                comment_id = %id,
                issue_id = %issue_id,
                ?reason,
                "parent issue could not be created; dropping comment"
            );
            return Ok(IngestOutcome::Dropped(DropReason::ParentIssueUnavailable));
        }

        let record = CommentRecord::new(
            id,
            issue_id,
            event.comment.author_id(),
            visibility,
            markdown,
            delivery.snapshot().clone(),
        );
        match self.repository.create_comment(&record).await {
            Ok(()) => {
                info!(outcome = "ok", comment_id = %record.id(), "successfully created comment");
                Ok(IngestOutcome::Stored)
            }
            Err(err) => {
                error!(
                    comment_id = %record.id(),
                    error = %err,
                    comment = ?event.comment,
                    "error creating comment"
                );
                self.failure_policy.create_comment().resolve(err)
            }
        }
    }

    /// Handles an `issue_comment.edited` delivery.
    ///
    /// The edited body replaces the stored markdown as-is: edits are neither
    /// redacted nor normalized.
    ///
    /// # Errors
    ///
    /// Returns [`super::IngestionError::Repository`] when the store rejects the
    /// update and the comment update policy is [`super::OnFailure::Propagate`].
    #[tracing::instrument(skip_all, fields(comment_id = %delivery.event().comment.node_id))]
    pub async fn ingest_edited(
        &self,
        delivery: &Delivery<IssueCommentEvent>,
    ) -> IngestionResult<IngestOutcome> {
        let event = delivery.event();
        let visibility = event.repository.visibility();

        let Ok(id) = CommentNodeId::new(event.comment.node_id.as_str()) else {
            error!("comment node id is empty");
            return Ok(IngestOutcome::Dropped(DropReason::InvalidNodeId));
        };
        let Ok(markdown) = Markdown::new(event.comment.body.clone().unwrap_or_default()) else {
            error!(comment_id = %id, "edited comment body is empty");
            return Ok(IngestOutcome::Dropped(DropReason::EmptyComment));
        };

        let outcome = match self
            .repository
            .update_comment(&markdown, &id, visibility)
            .await
        {
            Ok(()) => {
                info!(outcome = "ok", comment_id = %id, "successfully updated comment");
                Ok(IngestOutcome::Stored)
            }
            Err(err) => {
                error!(comment_id = %id, error = %err, "error updating comment");
                self.failure_policy.update_comment().resolve(err)
            }
        };
        trace!("exiting comment update");
        outcome
    }
}
