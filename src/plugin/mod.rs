//! Plugin entry surface: settings, invocation envelope and event routing.
//!
//! The hosting kernel invokes the plugin with a [`PluginInputs`] document.
//! [`EventDispatcher`] validates it and hands the payload to the ingestion
//! service for the event.

mod dispatch;
mod inputs;
mod settings;

pub use dispatch::{DispatchError, DispatchResult, EventDispatcher};
pub use inputs::{PluginInputs, SupportedEvent, UnsupportedEventError};
pub use settings::{PluginSettings, SettingsError};

#[cfg(test)]
mod tests;
