//! Shared world state for content ingestion BDD scenarios.

use std::sync::Arc;

use issue_ingest::{
    ingestion::{adapters::memory::InMemoryContentRepository, services::IngestOutcome},
    plugin::{DispatchError, EventDispatcher, PluginInputs, PluginSettings},
};
use rstest::fixture;
use serde_json::{Value, json};

/// Node identifier of the scenario issue.
pub const ISSUE_NODE_ID: &str = "I_kwDOScenario";
/// Node identifier of the scenario comment.
pub const COMMENT_NODE_ID: &str = "IC_kwDOScenario";

/// Scenario world for content ingestion behaviour tests.
pub struct IngestionWorld {
    pub repository: Arc<InMemoryContentRepository>,
    pub dispatcher: EventDispatcher<InMemoryContentRepository>,
    pub settings: PluginSettings,
    pub issue: Option<Value>,
    pub is_private: bool,
    pub last_outcome: Option<Result<IngestOutcome, DispatchError>>,
}

impl IngestionWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryContentRepository::new());
        Self {
            dispatcher: EventDispatcher::new(Arc::clone(&repository)),
            repository,
            settings: PluginSettings::default(),
            issue: None,
            is_private: false,
            last_outcome: None,
        }
    }

    /// Records the scenario issue as it appears in webhook payloads.
    pub fn set_issue(&mut self, title: Option<&str>, body: Option<&str>, is_private: bool) {
        self.issue = Some(json!({
            "node_id": ISSUE_NODE_ID,
            "number": 12,
            "title": title,
            "body": body,
            "user": { "id": 31, "login": "reporter" },
            "pull_request": null
        }));
        self.is_private = is_private;
    }

    /// Builds plugin inputs for `event_name` carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error when the inputs document cannot be decoded.
    pub fn inputs(&self, event_name: &str, payload: Value) -> Result<PluginInputs, eyre::Report> {
        let settings = serde_json::to_value(&self.settings)?;
        Ok(serde_json::from_value(json!({
            "stateId": "scenario",
            "eventName": event_name,
            "eventPayload": payload,
            "settings": settings,
            "authToken": "ghs_scenario",
            "ref": "main"
        }))?)
    }

    /// Builds the issue opened payload for the scenario issue.
    ///
    /// # Errors
    ///
    /// Returns an error when no issue was set up.
    pub fn issue_payload(&self) -> Result<Value, eyre::Report> {
        let issue = self
            .issue
            .clone()
            .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
        Ok(json!({
            "action": "opened",
            "issue": issue,
            "repository": { "private": self.is_private, "full_name": "acme/widgets" }
        }))
    }

    /// Builds a comment payload on the scenario issue.
    ///
    /// # Errors
    ///
    /// Returns an error when no issue was set up.
    pub fn comment_payload(&self, body: &str) -> Result<Value, eyre::Report> {
        let issue = self
            .issue
            .clone()
            .ok_or_else(|| eyre::eyre!("missing issue in scenario world"))?;
        Ok(json!({
            "comment": {
                "node_id": COMMENT_NODE_ID,
                "body": body,
                "user": { "id": 47, "login": "commenter" }
            },
            "issue": issue,
            "repository": { "private": self.is_private, "full_name": "acme/widgets" }
        }))
    }

    /// Dispatches `payload` as `event_name` and records the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when the inputs document cannot be built.
    pub fn dispatch(&mut self, event_name: &str, payload: Value) -> Result<(), eyre::Report> {
        let inputs = self.inputs(event_name, payload)?;
        self.last_outcome = Some(run_async(self.dispatcher.dispatch(inputs)));
        Ok(())
    }
}

impl Default for IngestionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IngestionWorld {
    IngestionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
