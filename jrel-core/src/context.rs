//! # Operation Context
//!
//! The scoping tuple every release workflow operation runs against.

use serde::{Deserialize, Serialize};

/// Project, fix version, and closed state for one operation.
///
/// A context is immutable once built. Empty fields are accepted here and
/// rejected by the operations that need them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
  project: String,
  fix_for_version: String,
  closed_state: String,
}

impl Context {
  pub fn new(project: impl Into<String>, fix_for_version: impl Into<String>, closed_state: impl Into<String>) -> Self {
    Self {
      project: project.into(),
      fix_for_version: fix_for_version.into(),
      closed_state: closed_state.into(),
    }
  }

  /// Key of the target project, e.g. `ABC`
  pub fn project(&self) -> &str {
    &self.project
  }

  /// Name of the target fix version, e.g. `1.0`
  pub fn fix_for_version(&self) -> &str {
    &self.fix_for_version
  }

  /// Workflow status that represents a closed issue
  pub fn closed_state(&self) -> &str {
    &self.closed_state
  }
}
