//! Issue and comment content ingestion.
//!
//! This module turns issue tracker webhook deliveries into canonical content
//! records for downstream similarity matching. Issue bodies are stripped of
//! footnotes, content from private repositories is redacted when configured,
//! and a comment is only stored once its parent issue exists. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
