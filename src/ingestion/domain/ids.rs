//! Identifier and validated scalar types for ingested content.

use super::IngestionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable tracker node identifier of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNodeId(String);

/// Stable tracker node identifier of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentNodeId(String);

fn validated_node_id(value: impl Into<String>) -> Result<String, IngestionDomainError> {
    let raw = value.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(IngestionDomainError::EmptyNodeId);
    }
    Ok(normalized.to_owned())
}

macro_rules! node_id_impls {
    ($name:ident) => {
        impl $name {
            /// Creates a validated node identifier.
            ///
            /// # Errors
            ///
            /// Returns [`IngestionDomainError::EmptyNodeId`] when the value is
            /// empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, IngestionDomainError> {
                validated_node_id(value).map(Self)
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

node_id_impls!(IssueNodeId);
node_id_impls!(CommentNodeId);

/// Numeric identifier of a content author.
///
/// Anonymous or unknown authors are stored as [`AuthorId::UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    /// Sentinel stored when the author cannot be determined.
    pub const UNKNOWN: Self = Self(-1);

    /// Creates an author identifier, mapping `0` to [`AuthorId::UNKNOWN`].
    #[must_use]
    pub const fn new(value: i64) -> Self {
        if value == 0 { Self::UNKNOWN } else { Self(value) }
    }

    /// Derives an author identifier from an optional user id.
    #[must_use]
    pub fn from_optional(value: Option<i64>) -> Self {
        value.map_or(Self::UNKNOWN, Self::new)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility of the repository an event originated from.
///
/// Derived once per event and never re-derived for stored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Repository content is publicly readable.
    Public,
    /// Repository content is restricted.
    Private,
}

impl Visibility {
    /// Maps the webhook `private` flag to a visibility.
    #[must_use]
    pub const fn from_private_flag(is_private: bool) -> Self {
        if is_private { Self::Private } else { Self::Public }
    }

    /// Returns `true` for private repositories.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}
