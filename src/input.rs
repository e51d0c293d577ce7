//! Where issue references come from and how they become keys.
//!
//! Commands take issue keys either as positional arguments or as lines piped
//! on stdin, never both. The binary decides which once, at startup, and hands
//! an [`InputSource`] down; nothing below it looks at terminal state.

use thiserror::Error;
use tracing::debug;

use crate::keys::IssueLinks;

/// Errors raised while turning raw input into issue keys.
#[derive(Debug, Error)]
pub enum InputError {
    /// No issue was given at all.
    #[error("no issue given, pass an issue key or pipe issue URLs on stdin")]
    NoIssues,

    /// A line was neither an issue key nor a browse URL of this instance.
    #[error("line {line}: '{value}' is neither an issue key nor an issue URL")]
    InvalidIssueRef { line: usize, value: String },
}

/// The origin of issue references for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Positional command-line arguments, one reference each.
    Arguments(Vec<String>),
    /// Newline-separated content read from stdin.
    Stdin(String),
}

impl InputSource {
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin(_))
    }

    /// Resolve every reference into an issue key.
    ///
    /// Blank lines are skipped. Any other unresolvable entry fails the whole
    /// input so that no request is sent for a partially understood batch.
    pub fn resolve(&self, links: &IssueLinks) -> Result<Vec<String>, InputError> {
        let entries: Vec<&str> = match self {
            InputSource::Arguments(args) => args.iter().map(String::as_str).collect(),
            InputSource::Stdin(content) => content.lines().collect(),
        };

        let mut keys = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                continue;
            }
            let key = links
                .key_from(entry)
                .ok_or_else(|| InputError::InvalidIssueRef {
                    line: idx + 1,
                    value: entry.trim().to_string(),
                })?;
            keys.push(key);
        }

        if keys.is_empty() {
            return Err(InputError::NoIssues);
        }

        debug!(count = keys.len(), stdin = self.is_stdin(), "Resolved issue keys");
        Ok(keys)
    }
}
