//! Port contracts for content ingestion.
//!
//! Ports define infrastructure-agnostic interfaces used by ingestion
//! services.

pub mod repository;

#[cfg(test)]
pub use repository::MockContentRepository;
pub use repository::{ContentRepository, ContentRepositoryError, ContentRepositoryResult};
