//! Application services for issue and comment ingestion.

mod comment;
mod issue;
mod policy;

pub use comment::CommentIngestionService;
pub use issue::IssueIngestionService;
pub use policy::{DropReason, FailurePolicy, IngestOutcome, OnFailure, ParentIssue};

use crate::ingestion::ports::ContentRepositoryError;
use thiserror::Error;

/// Service-level errors for ingestion operations.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ContentRepositoryError),
}

/// Result type for ingestion service operations.
pub type IngestionResult<T> = Result<T, IngestionError>;
