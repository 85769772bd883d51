//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables hold an
//! [`EnvVarGuard`], which serializes them and restores the original value on
//! drop.

use std::env;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard over a single environment variable
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
  _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
  /// Take ownership of `name` for the lifetime of the guard
  pub fn new(name: &str) -> Self {
    // A panicking test poisons the lock; the variable is restored on drop anyway
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
      _lock: lock,
    }
  }

  /// Set the variable
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the variable
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
