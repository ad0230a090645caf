//! In-memory adapters for ingestion tests and local runs.

mod content;

pub use content::InMemoryContentRepository;
