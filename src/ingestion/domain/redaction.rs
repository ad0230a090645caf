//! Privacy redaction of content from private repositories.

use super::Visibility;
use std::borrow::Cow;

/// Placeholder stored in place of redacted free text.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Decides whether free text from a repository must be replaced before it is
/// stored.
///
/// Redaction applies only when it is enabled *and* the repository is private.
/// Issue titles survive redaction; bodies never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedactionPolicy {
    enabled: bool,
}

impl RedactionPolicy {
    /// Creates a policy from the configuration toggle.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns whether the configuration toggle is on.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Returns whether content from a repository with `visibility` is
    /// redacted.
    #[must_use]
    pub const fn applies_to(self, visibility: Visibility) -> bool {
        self.enabled && visibility.is_private()
    }

    /// Applies the policy to `body`.
    ///
    /// Returns [`Cow::Borrowed`] with the untouched input when the policy does
    /// not apply. Otherwise returns the placeholder, prefixed by `title` and a
    /// blank line when a title is supplied.
    #[must_use]
    pub fn redact<'a>(
        self,
        body: &'a str,
        title: Option<&str>,
        visibility: Visibility,
    ) -> Cow<'a, str> {
        if !self.applies_to(visibility) {
            return Cow::Borrowed(body);
        }
        match title {
            Some(issue_title) => Cow::Owned(format!("{issue_title}\n\n{REDACTED_PLACEHOLDER}")),
            None => Cow::Owned(REDACTED_PLACEHOLDER.to_owned()),
        }
    }
}
