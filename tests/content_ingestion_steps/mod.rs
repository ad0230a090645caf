//! Step definitions for content ingestion BDD scenarios.

mod then;
pub mod world;
