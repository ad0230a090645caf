//! `PostgreSQL` adapters for content persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ContentPgPool, PostgresContentRepository};
