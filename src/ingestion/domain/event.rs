//! Webhook payload shapes consumed by the ingestion handlers.
//!
//! Only the fields the handlers read are modelled; everything else in a
//! delivery is ignored while decoding and kept in the raw snapshot.

use super::{AuthorId, Visibility};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account that authored an issue or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    /// Numeric account identifier.
    pub id: i64,
    /// Account login.
    #[serde(default)]
    pub login: Option<String>,
}

/// Repository an event originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryPayload {
    /// Whether the repository is private.
    pub private: bool,
    /// Repository name in `owner/repo` form.
    #[serde(default)]
    pub full_name: Option<String>,
}

impl RepositoryPayload {
    /// Returns the repository visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        Visibility::from_private_flag(self.private)
    }
}

/// Issue object carried by issue and issue comment events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePayload {
    /// Stable node identifier.
    pub node_id: String,
    /// Repository-scoped issue number.
    #[serde(default)]
    pub number: Option<u64>,
    /// Issue title.
    #[serde(default)]
    pub title: Option<String>,
    /// Issue body markdown.
    #[serde(default)]
    pub body: Option<String>,
    /// Issue author.
    #[serde(default)]
    pub user: Option<UserPayload>,
    /// Present when the "issue" is a pull request.
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl IssuePayload {
    /// Returns whether this issue is a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.as_ref().is_some_and(|marker| !marker.is_null())
    }

    /// Returns the author identifier, or [`AuthorId::UNKNOWN`].
    #[must_use]
    pub fn author_id(&self) -> AuthorId {
        AuthorId::from_optional(self.user.as_ref().map(|user| user.id))
    }
}

/// Comment object carried by issue comment events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    /// Stable node identifier.
    pub node_id: String,
    /// Comment body markdown.
    #[serde(default)]
    pub body: Option<String>,
    /// Comment author.
    #[serde(default)]
    pub user: Option<UserPayload>,
}

impl CommentPayload {
    /// Returns the author identifier, or [`AuthorId::UNKNOWN`].
    #[must_use]
    pub fn author_id(&self) -> AuthorId {
        AuthorId::from_optional(self.user.as_ref().map(|user| user.id))
    }
}

/// `issues.opened` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueOpenedEvent {
    /// The opened issue.
    pub issue: IssuePayload,
    /// The owning repository.
    pub repository: RepositoryPayload,
}

/// `issue_comment.created` and `issue_comment.edited` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    /// The created or edited comment.
    pub comment: CommentPayload,
    /// The issue the comment belongs to.
    pub issue: IssuePayload,
    /// The owning repository.
    pub repository: RepositoryPayload,
}

/// A decoded event together with the raw JSON it was decoded from.
///
/// The raw snapshot is what gets stored as a record's `payload`.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<E> {
    event: E,
    snapshot: Value,
}

impl<E> Delivery<E> {
    /// Returns the decoded event.
    #[must_use]
    pub const fn event(&self) -> &E {
        &self.event
    }

    /// Returns the raw JSON snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Value {
        &self.snapshot
    }
}

impl<E: DeserializeOwned> Delivery<E> {
    /// Decodes an event from raw webhook JSON, keeping the JSON as snapshot.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the payload does not match `E`.
    pub fn from_json(snapshot: Value) -> Result<Self, serde_json::Error> {
        let event = E::deserialize(&snapshot)?;
        Ok(Self { event, snapshot })
    }
}

impl<E: Serialize> Delivery<E> {
    /// Wraps an already-decoded event, serializing it as the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the event cannot be serialized.
    pub fn from_event(event: E) -> Result<Self, serde_json::Error> {
        let snapshot = serde_json::to_value(&event)?;
        Ok(Self { event, snapshot })
    }
}
