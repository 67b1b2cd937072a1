//! CombatLog - Append-only record of what happened in an encounter

use serde::{Deserialize, Serialize};

/// Ordered log lines for one session
///
/// Lines are only ever appended, never edited or truncated. Views that need a
/// bounded window slice it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub(crate) fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.entries.extend(lines);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Lines appended at or after `index`
    pub fn since(&self, index: usize) -> &[String] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|line| line.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }
}
