//! Shared test helpers for in-memory repository integration tests.

use issue_ingest::ingestion::{
    adapters::memory::InMemoryContentRepository,
    domain::{
        AuthorId, CommentNodeId, CommentRecord, IssueNodeId, IssueRecord, Markdown, Visibility,
    },
};
use issue_ingest::plugin::PluginInputs;
use rstest::fixture;
use serde_json::{Value, json};
use std::io;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryContentRepository {
    InMemoryContentRepository::new()
}

/// Builds an issue record with the given node identifier and markdown.
///
/// # Errors
///
/// Returns an error if the identifier or markdown is blank.
pub fn issue_record(id: &str, markdown: &str) -> Result<IssueRecord, eyre::Report> {
    Ok(IssueRecord::new(
        IssueNodeId::new(id)?,
        AuthorId::new(11),
        Visibility::Public,
        Markdown::new(markdown)?,
        json!({ "issue": { "node_id": id } }),
    ))
}

/// Builds a comment record under `issue_id`.
///
/// # Errors
///
/// Returns an error if an identifier or the markdown is blank.
pub fn comment_record(
    id: &str,
    issue_id: &str,
    markdown: &str,
    visibility: Visibility,
) -> Result<CommentRecord, eyre::Report> {
    Ok(CommentRecord::new(
        CommentNodeId::new(id)?,
        IssueNodeId::new(issue_id)?,
        AuthorId::new(12),
        visibility,
        Markdown::new(markdown)?,
        json!({ "comment": { "node_id": id } }),
    ))
}

/// Builds a comment webhook payload on a plain issue.
#[must_use]
pub fn comment_payload(comment_id: &str, issue_id: &str, body: &str, is_private: bool) -> Value {
    json!({
        "comment": { "node_id": comment_id, "body": body, "user": { "id": 12 } },
        "issue": {
            "node_id": issue_id,
            "title": "Crash on startup",
            "body": "Exits immediately",
            "user": { "id": 11 }
        },
        "repository": { "private": is_private }
    })
}

/// Wraps an event payload in plugin inputs.
///
/// # Errors
///
/// Returns an error if the inputs document cannot be decoded.
pub fn plugin_inputs(
    event_name: &str,
    payload: Value,
    settings: Value,
) -> Result<PluginInputs, eyre::Report> {
    Ok(serde_json::from_value(json!({
        "stateId": "integration",
        "eventName": event_name,
        "eventPayload": payload,
        "settings": settings,
        "authToken": "ghs_integration",
        "ref": "main"
    }))?)
}
