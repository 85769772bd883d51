//! # Error Types
//!
//! Errors raised by release workflow operations. Illegal workflow
//! transitions are deliberately absent: they are reported through
//! [`crate::TransitionOutcome::Rejected`] so a batch can carry on.

use thiserror::Error;

/// Errors returned by [`crate::ReleaseTracker`] operations
#[derive(Debug, Error)]
pub enum ReleaseError {
  /// A required argument was empty or missing
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
  /// The tracker or context is not in a state that allows the operation
  #[error("Invalid state: {0}")]
  InvalidState(String),
  /// The tracker is unreachable or the account lacks a required permission
  #[error("Connection check failed: {0}")]
  Connection(String),
  /// A remote call failed
  #[error(transparent)]
  Gateway(#[from] anyhow::Error),
}

/// Result alias for release workflow operations
pub type Result<T, E = ReleaseError> = std::result::Result<T, E>;

/// Fail with [`ReleaseError::InvalidArgument`] when `value` holds no text.
pub(crate) fn require_text(value: &str, what: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(ReleaseError::InvalidArgument(format!("{what} must contain text.")));
  }
  Ok(())
}
