//! Canonical records persisted for issues and comments.

use super::{AuthorId, CommentNodeId, IssueNodeId, Markdown, Visibility};
use serde_json::Value;

/// Stored issue content.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    id: IssueNodeId,
    author_id: AuthorId,
    visibility: Visibility,
    markdown: Markdown,
    payload: Value,
}

impl IssueRecord {
    /// Creates an issue record.
    #[must_use]
    pub const fn new(
        id: IssueNodeId,
        author_id: AuthorId,
        visibility: Visibility,
        markdown: Markdown,
        payload: Value,
    ) -> Self {
        Self {
            id,
            author_id,
            visibility,
            markdown,
            payload,
        }
    }

    /// Returns the issue node identifier.
    #[must_use]
    pub const fn id(&self) -> &IssueNodeId {
        &self.id
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn author_id(&self) -> AuthorId {
        self.author_id
    }

    /// Returns the repository visibility captured at creation.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the stored markdown.
    #[must_use]
    pub const fn markdown(&self) -> &Markdown {
        &self.markdown
    }

    /// Returns the originating event snapshot.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }
}

/// Stored comment content.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    id: CommentNodeId,
    issue_id: IssueNodeId,
    author_id: AuthorId,
    visibility: Visibility,
    markdown: Markdown,
    payload: Value,
}

impl CommentRecord {
    /// Creates a comment record.
    #[must_use]
    pub const fn new(
        id: CommentNodeId,
        issue_id: IssueNodeId,
        author_id: AuthorId,
        visibility: Visibility,
        markdown: Markdown,
        payload: Value,
    ) -> Self {
        Self {
            id,
            issue_id,
            author_id,
            visibility,
            markdown,
            payload,
        }
    }

    /// Returns the comment node identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentNodeId {
        &self.id
    }

    /// Returns the owning issue's node identifier.
    #[must_use]
    pub const fn issue_id(&self) -> &IssueNodeId {
        &self.issue_id
    }

    /// Returns the author identifier.
    #[must_use]
    pub const fn author_id(&self) -> AuthorId {
        self.author_id
    }

    /// Returns the repository visibility captured at creation.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the stored markdown.
    #[must_use]
    pub const fn markdown(&self) -> &Markdown {
        &self.markdown
    }

    /// Returns the originating event snapshot.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Replaces the stored markdown, as an edit event does.
    ///
    /// Visibility is left as captured at creation.
    pub fn replace_markdown(&mut self, markdown: Markdown) {
        self.markdown = markdown;
    }
}
