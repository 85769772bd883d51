//! # Status Labels
//!
//! Maps remote workflow status names to display names. The mapping is purely
//! presentational; workflow decisions compare raw remote statuses with
//! [`same_status`].

use std::collections::BTreeMap;

/// Lookup table from remote status name to display name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
  labels: BTreeMap<String, String>,
}

impl StatusMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a label for a remote status
  pub fn with_label(mut self, remote: impl Into<String>, display: impl Into<String>) -> Self {
    self.labels.insert(remote.into(), display.into());
    self
  }

  /// Display name for a remote status, or the remote name when unmapped
  pub fn display<'a>(&'a self, remote: &'a str) -> &'a str {
    self.labels.get(remote).map_or(remote, String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }
}

impl From<BTreeMap<String, String>> for StatusMap {
  fn from(labels: BTreeMap<String, String>) -> Self {
    Self { labels }
  }
}

/// Case-insensitive status comparison
pub fn same_status(a: &str, b: &str) -> bool {
  a.to_lowercase() == b.to_lowercase()
}
