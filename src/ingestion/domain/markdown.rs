//! Stored markdown values and footnote normalization.
//!
//! The deduplication bot annotates issues with footnotes pointing at possible
//! duplicates. Those annotations must not feed back into similarity
//! matching, so every issue body is stripped of footnote markup before it is
//! stored.

use super::IngestionDomainError;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Non-empty markdown text as persisted for an issue or comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markdown(String);

impl Markdown {
    /// Creates a markdown value, keeping the text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionDomainError::EmptyMarkdown`] when the text has no
    /// non-whitespace content.
    pub fn new(value: impl Into<String>) -> Result<Self, IngestionDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(IngestionDomainError::EmptyMarkdown);
        }
        Ok(Self(text))
    }

    /// Returns the markdown as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the owned text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Markdown {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Markdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Labels exclude brackets, carets and whitespace. The optional trailing caret
// accepts the `[^01^]` style written by the deduplication bot.
#[expect(
    clippy::expect_used,
    reason = "pattern is a compile-time constant covered by unit tests"
)]
static FOOTNOTE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}\[\^([^\[\]\^\s]+)\^?\]:").expect("valid footnote definition pattern")
});

#[expect(
    clippy::expect_used,
    reason = "pattern is a compile-time constant covered by unit tests"
)]
static FOOTNOTE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\^([^\[\]\^\s]+)\^?\]").expect("valid footnote marker pattern")
});

/// Removes footnote definitions and their reference markers from markdown.
///
/// Only markers whose label is defined in the same text are removed; dangling
/// markers and malformed syntax are left untouched, as is anything inside a
/// fenced code block. The removal pass is repeated until the text stops
/// changing, so `normalize(&normalize(x)) == normalize(x)` for every input.
#[must_use]
pub fn normalize(markdown: &str) -> String {
    let mut current = strip_footnotes_once(markdown);
    loop {
        let next = strip_footnotes_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Assembles the stored text of an issue as `"{body} {title}"`.
///
/// The body is normalized first. Markers in the title that point at a
/// footnote defined in the body are removed too. Returns `None` when either
/// part is blank afterwards.
#[must_use]
pub fn assemble_issue_markdown(body: &str, title: &str) -> Option<String> {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut labels = HashSet::new();
    classify_lines(&lines, &mut labels);

    let normalized_body = normalize(body);
    let stripped_title = strip_markers(title, &labels);
    if normalized_body.trim().is_empty() || stripped_title.trim().is_empty() {
        return None;
    }
    Some(format!("{normalized_body} {stripped_title}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Prose,
    Fenced,
    Definition,
}

fn is_fence_delimiter(line: &str) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let rest = line.trim_start_matches(' ');
    indent <= 3 && (rest.starts_with("```") || rest.starts_with("~~~"))
}

fn is_continuation(line: &str) -> bool {
    !line.trim().is_empty() && (line.starts_with("    ") || line.starts_with('\t'))
}

fn classify_lines<'a>(lines: &[&'a str], labels: &mut HashSet<&'a str>) -> Vec<LineKind> {
    let mut kinds = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    let mut in_definition = false;

    for &line in lines {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            in_definition = false;
            kinds.push(LineKind::Fenced);
            continue;
        }
        if in_fence {
            kinds.push(LineKind::Fenced);
            continue;
        }
        if let Some(label) = FOOTNOTE_DEFINITION
            .captures(line)
            .and_then(|captures| captures.get(1))
        {
            labels.insert(label.as_str());
            in_definition = true;
            kinds.push(LineKind::Definition);
            continue;
        }
        if in_definition && is_continuation(line) {
            kinds.push(LineKind::Definition);
            continue;
        }
        in_definition = false;
        kinds.push(LineKind::Prose);
    }
    kinds
}

fn strip_footnotes_once(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let mut labels = HashSet::new();
    let kinds = classify_lines(&lines, &mut labels);
    if labels.is_empty() {
        return markdown.to_owned();
    }

    let mut kept: Vec<String> = lines
        .iter()
        .zip(&kinds)
        .filter_map(|(line, kind)| match kind {
            LineKind::Definition => None,
            LineKind::Fenced => Some((*line).to_owned()),
            LineKind::Prose => Some(strip_markers(line, &labels).into_owned()),
        })
        .collect();

    while kept.last().is_some_and(|line| line.trim().is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

fn strip_markers<'a>(line: &'a str, labels: &HashSet<&str>) -> Cow<'a, str> {
    FOOTNOTE_MARKER.replace_all(line, |captures: &Captures<'_>| {
        let label = captures.get(1).map_or("", |m| m.as_str());
        if labels.contains(label) {
            String::new()
        } else {
            captures
                .get(0)
                .map_or_else(String::new, |m| m.as_str().to_owned())
        }
    })
}
