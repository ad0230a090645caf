//! Error types for ingestion domain validation.

use thiserror::Error;

/// Errors returned while constructing ingestion domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestionDomainError {
    /// A tracker node identifier was empty after trimming.
    #[error("node identifier must not be empty")]
    EmptyNodeId,

    /// Stored markdown must contain at least one non-whitespace character.
    #[error("markdown must not be empty")]
    EmptyMarkdown,
}
