//! Unit tests for the ingestion bounded context.
