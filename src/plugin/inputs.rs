//! Invocation envelope passed to the plugin by the hosting kernel.

use super::PluginSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Inputs for one plugin run.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInputs {
    /// Kernel-side identifier of the run.
    pub state_id: String,
    /// Webhook event name, such as `issues.opened`.
    pub event_name: String,
    /// Raw webhook payload.
    pub event_payload: Value,
    /// Plugin configuration.
    #[serde(default)]
    pub settings: PluginSettings,
    /// Installation token for calls back to the tracker.
    pub auth_token: String,
    /// Git ref the plugin was invoked from.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl fmt::Debug for PluginInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInputs")
            .field("state_id", &self.state_id)
            .field("event_name", &self.event_name)
            .field("settings", &self.settings)
            .field("auth_token", &"<redacted>")
            .field("git_ref", &self.git_ref)
            .finish_non_exhaustive()
    }
}

/// Webhook events this plugin handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedEvent {
    /// `issues.opened`
    IssueOpened,
    /// `issue_comment.created`
    IssueCommentCreated,
    /// `issue_comment.edited`
    IssueCommentEdited,
}

impl SupportedEvent {
    /// Returns the event name as delivered by the kernel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IssueOpened => "issues.opened",
            Self::IssueCommentCreated => "issue_comment.created",
            Self::IssueCommentEdited => "issue_comment.edited",
        }
    }
}

/// Error returned for event names the plugin does not handle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported event: {0}")]
pub struct UnsupportedEventError(pub String);

impl FromStr for SupportedEvent {
    type Err = UnsupportedEventError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "issues.opened" => Ok(Self::IssueOpened),
            "issue_comment.created" => Ok(Self::IssueCommentCreated),
            "issue_comment.edited" => Ok(Self::IssueCommentEdited),
            other => Err(UnsupportedEventError(other.to_owned())),
        }
    }
}

impl fmt::Display for SupportedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
