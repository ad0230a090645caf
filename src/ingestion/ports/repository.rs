//! Repository port for issue and comment content persistence.

use crate::ingestion::domain::{
    CommentNodeId, CommentRecord, IssueNodeId, IssueRecord, Markdown, Visibility,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for content repository operations.
pub type ContentRepositoryResult<T> = Result<T, ContentRepositoryError>;

/// Content persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds an issue by node identifier.
    ///
    /// Returns `None` when the issue has not been stored.
    async fn find_issue(&self, id: &IssueNodeId) -> ContentRepositoryResult<Option<IssueRecord>>;

    /// Stores a new issue.
    ///
    /// Storing an issue whose identifier already exists succeeds without
    /// modifying the stored record, so concurrent creators of the same
    /// parent issue do not fail each other.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::Persistence`] when the store fails.
    async fn create_issue(&self, issue: &IssueRecord) -> ContentRepositoryResult<()>;

    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::DuplicateComment`] when the comment
    /// identifier already exists.
    async fn create_comment(&self, comment: &CommentRecord) -> ContentRepositoryResult<()>;

    /// Replaces the markdown of an existing comment.
    ///
    /// `visibility` is the repository visibility reported by the edit event.
    /// The visibility captured at creation is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::CommentNotFound`] when the comment
    /// does not exist.
    async fn update_comment(
        &self,
        markdown: &Markdown,
        id: &CommentNodeId,
        visibility: Visibility,
    ) -> ContentRepositoryResult<()>;

    /// Finds a comment by node identifier.
    ///
    /// Returns `None` when the comment has not been stored.
    async fn find_comment(
        &self,
        id: &CommentNodeId,
    ) -> ContentRepositoryResult<Option<CommentRecord>>;
}

/// Errors returned by content repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ContentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentNodeId),

    /// The comment was not found.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentNodeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
