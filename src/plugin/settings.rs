//! Plugin settings supplied with every invocation.

use crate::ingestion::domain::RedactionPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when settings fail validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    /// A similarity threshold is outside `0.0..=1.0`.
    #[error("invalid {name}: {value}. Must be between 0 and 1")]
    ThresholdOutOfRange {
        /// Setting key as it appears in configuration.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Plugin configuration.
///
/// Missing keys fall back to their defaults. The thresholds are consumed by
/// the similarity matcher, not by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginSettings {
    /// Similarity above which an issue is treated as a duplicate.
    pub match_threshold: f64,
    /// Similarity above which a possible duplicate is flagged.
    pub warning_threshold: f64,
    /// Similarity above which an issue is matched to a job.
    pub job_matching_threshold: f64,
    /// Replace bodies from private repositories with a placeholder.
    pub redact_private_repo_comments: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            match_threshold: 0.95,
            warning_threshold: 0.75,
            job_matching_threshold: 0.75,
            redact_private_repo_comments: false,
        }
    }
}

impl PluginSettings {
    /// Checks that every threshold lies in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ThresholdOutOfRange`] for the first offending
    /// threshold.
    pub fn validate(&self) -> Result<(), SettingsError> {
        [
            ("matchThreshold", self.match_threshold),
            ("warningThreshold", self.warning_threshold),
            ("jobMatchingThreshold", self.job_matching_threshold),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
        .map_or(Ok(()), |(name, value)| {
            Err(SettingsError::ThresholdOutOfRange { name, value })
        })
    }

    /// Returns the redaction policy selected by these settings.
    #[must_use]
    pub const fn redaction_policy(&self) -> RedactionPolicy {
        RedactionPolicy::new(self.redact_private_repo_comments)
    }
}
