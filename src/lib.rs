//! Issue ingest: issue tracker content ingestion for duplicate detection.
//!
//! This crate receives issue and comment webhook events, strips and redacts
//! their text according to repository visibility and plugin settings, and
//! stores canonical records that the similarity matcher works from.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`ingestion`]: Normalization, redaction and issue/comment persistence
//! - [`plugin`]: Plugin settings, invocation envelope and event dispatch

pub mod ingestion;
pub mod plugin;
