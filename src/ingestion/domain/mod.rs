//! Domain model for issue and comment ingestion.
//!
//! Webhook payloads, validated identifiers, stored records and the two pure
//! content transformations (footnote normalization and redaction). Nothing in
//! this module performs I/O.

mod error;
mod event;
mod ids;
mod markdown;
mod record;
mod redaction;

pub use error::IngestionDomainError;
pub use event::{
    CommentPayload, Delivery, IssueCommentEvent, IssueOpenedEvent, IssuePayload,
    RepositoryPayload, UserPayload,
};
pub use ids::{AuthorId, CommentNodeId, IssueNodeId, Visibility};
pub use markdown::{Markdown, assemble_issue_markdown, normalize};
pub use record::{CommentRecord, IssueRecord};
pub use redaction::{REDACTED_PLACEHOLDER, RedactionPolicy};
