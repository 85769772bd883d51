use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for test .netrc files
///
/// Creates a temporary home directory holding a `.netrc` with the given
/// content. Callers pass [`NetrcGuard::home_dir`] to the code under test
/// instead of mutating `HOME`.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    fs::write(&netrc_path, content).expect("Failed to write test .netrc");

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
