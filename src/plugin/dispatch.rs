//! Routes plugin invocations to the ingestion handlers.

use super::{PluginInputs, SettingsError, SupportedEvent, UnsupportedEventError};
use crate::ingestion::{
    domain::{Delivery, IssueCommentEvent, IssueOpenedEvent, RedactionPolicy},
    ports::ContentRepository,
    services::{
        CommentIngestionService, FailurePolicy, IngestOutcome, IngestionError,
        IssueIngestionService,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while dispatching a plugin invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The event name is not handled by this plugin.
    #[error(transparent)]
    UnsupportedEvent(#[from] UnsupportedEventError),
    /// The settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The payload does not match the event's expected shape.
    #[error("failed to decode {event} payload: {source}")]
    Payload {
        /// Event whose payload failed to decode.
        event: SupportedEvent,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The handler propagated a failure.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatches plugin invocations to the matching ingestion service.
///
/// Services are built per invocation because the redaction toggle travels
/// with each invocation's settings.
#[derive(Clone)]
pub struct EventDispatcher<R>
where
    R: ContentRepository,
{
    repository: Arc<R>,
    failure_policy: FailurePolicy,
}

impl<R> EventDispatcher<R>
where
    R: ContentRepository,
{
    /// Creates a dispatcher with the default failure policy.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Replaces the failure policy handed to every service.
    #[must_use]
    pub const fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Validates the settings and runs the handler for the event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the event is unsupported, the settings
    /// or payload are invalid, or the handler propagates a store failure.
    #[tracing::instrument(skip_all, fields(state_id = %inputs.state_id, event = %inputs.event_name))]
    pub async fn dispatch(&self, inputs: PluginInputs) -> DispatchResult<IngestOutcome> {
        let event: SupportedEvent = inputs.event_name.parse()?;
        inputs.settings.validate()?;
        let redaction = inputs.settings.redaction_policy();
        debug!(redaction_enabled = redaction.is_enabled(), "dispatching event");

        let outcome = match event {
            SupportedEvent::IssueOpened => {
                let delivery = decode::<IssueOpenedEvent>(event, inputs.event_payload)?;
                IssueIngestionService::new(Arc::clone(&self.repository), redaction)
                    .with_failure_policy(self.failure_policy)
                    .ingest_opened(&delivery)
                    .await?
            }
            SupportedEvent::IssueCommentCreated => {
                let delivery = decode::<IssueCommentEvent>(event, inputs.event_payload)?;
                self.comments(redaction).ingest_created(&delivery).await?
            }
            SupportedEvent::IssueCommentEdited => {
                let delivery = decode::<IssueCommentEvent>(event, inputs.event_payload)?;
                self.comments(redaction).ingest_edited(&delivery).await?
            }
        };
        debug!(?outcome, "event handled");
        Ok(outcome)
    }

    fn comments(&self, redaction: RedactionPolicy) -> CommentIngestionService<R> {
        CommentIngestionService::new(Arc::clone(&self.repository), redaction)
            .with_failure_policy(self.failure_policy)
    }
}

fn decode<E: DeserializeOwned>(
    event: SupportedEvent,
    payload: Value,
) -> DispatchResult<Delivery<E>> {
    Delivery::from_json(payload).map_err(|source| DispatchError::Payload { event, source })
}
