//! In-memory repository for ingestion tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ingestion::{
    domain::{CommentNodeId, CommentRecord, IssueNodeId, IssueRecord, Markdown, Visibility},
    ports::{ContentRepository, ContentRepositoryError, ContentRepositoryResult},
};

/// Thread-safe in-memory content repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    state: Arc<RwLock<InMemoryContentState>>,
}

#[derive(Debug, Default)]
struct InMemoryContentState {
    issues: HashMap<IssueNodeId, IssueRecord>,
    comments: HashMap<CommentNodeId, CommentRecord>,
}

impl InMemoryContentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored issues.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn issue_count(&self) -> ContentRepositoryResult<usize> {
        Ok(self.read()?.issues.len())
    }

    /// Returns the number of stored comments.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn comment_count(&self) -> ContentRepositoryResult<usize> {
        Ok(self.read()?.comments.len())
    }

    fn read(&self) -> ContentRepositoryResult<RwLockReadGuard<'_, InMemoryContentState>> {
        self.state.read().map_err(|err| {
            ContentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ContentRepositoryResult<RwLockWriteGuard<'_, InMemoryContentState>> {
        self.state.write().map_err(|err| {
            ContentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_issue(&self, id: &IssueNodeId) -> ContentRepositoryResult<Option<IssueRecord>> {
        Ok(self.read()?.issues.get(id).cloned())
    }

    async fn create_issue(&self, issue: &IssueRecord) -> ContentRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .issues
            .entry(issue.id().clone())
            .or_insert_with(|| issue.clone());
        Ok(())
    }

    async fn create_comment(&self, comment: &CommentRecord) -> ContentRepositoryResult<()> {
        let mut state = self.write()?;
        if state.comments.contains_key(comment.id()) {
            return Err(ContentRepositoryError::DuplicateComment(comment.id().clone()));
        }
        state.comments.insert(comment.id().clone(), comment.clone());
        Ok(())
    }

    async fn update_comment(
        &self,
        markdown: &Markdown,
        id: &CommentNodeId,
        visibility: Visibility,
    ) -> ContentRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .comments
            .get_mut(id)
            .ok_or_else(|| ContentRepositoryError::CommentNotFound(id.clone()))?;
        if stored.visibility() != visibility {
            tracing::warn!(
                comment_id = %id,
                stored = ?stored.visibility(),
                reported = ?visibility,
                "edit reports a different repository visibility; keeping the stored value"
            );
        }
        stored.replace_markdown(markdown.clone());
        Ok(())
    }

    async fn find_comment(
        &self,
        id: &CommentNodeId,
    ) -> ContentRepositoryResult<Option<CommentRecord>> {
        Ok(self.read()?.comments.get(id).cloned())
    }
}
