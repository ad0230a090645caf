//! Diesel row models for content persistence.

use super::schema::{comments, issues};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for issue records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IssueRow {
    /// Tracker node identifier.
    pub id: String,
    /// Author identifier.
    pub author_id: i64,
    /// Repository visibility at creation.
    pub is_private: bool,
    /// Stored markdown.
    pub markdown: String,
    /// Originating webhook payload.
    pub payload: Value,
}

/// Insert model for issue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub struct NewIssueRow {
    /// Tracker node identifier.
    pub id: String,
    /// Author identifier.
    pub author_id: i64,
    /// Repository visibility at creation.
    pub is_private: bool,
    /// Stored markdown.
    pub markdown: String,
    /// Originating webhook payload.
    pub payload: Value,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Tracker node identifier.
    pub id: String,
    /// Node identifier of the owning issue.
    pub issue_id: String,
    /// Author identifier.
    pub author_id: i64,
    /// Repository visibility at creation.
    pub is_private: bool,
    /// Stored markdown.
    pub markdown: String,
    /// Originating webhook payload.
    pub payload: Value,
}

/// Insert model for comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Tracker node identifier.
    pub id: String,
    /// Node identifier of the owning issue.
    pub issue_id: String,
    /// Author identifier.
    pub author_id: i64,
    /// Repository visibility at creation.
    pub is_private: bool,
    /// Stored markdown.
    pub markdown: String,
    /// Originating webhook payload.
    pub payload: Value,
}
