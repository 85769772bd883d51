//! # Configuration Management
//!
//! Loads and saves the jrel configuration file (`jrel.toml`) from the XDG
//! config directory: the Jira host, the project filter, the closed state, and
//! the status label map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::filter::ProjectFilter;
use crate::status::StatusMap;

/// Closed state used when the config file does not name one
pub const DEFAULT_CLOSED_STATE: &str = "Closed";

/// Settings for one Jira instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
  /// Jira host URL (e.g., https://company.atlassian.net)
  #[serde(default)]
  pub host: Option<String>,

  /// Workflow status that represents a closed issue
  #[serde(default = "default_closed_state")]
  pub closed_state: String,

  /// Project the release workflow operates on
  #[serde(default)]
  pub filter: Option<ProjectFilter>,

  /// Display names for remote statuses
  #[serde(default)]
  pub status_labels: BTreeMap<String, String>,
}

fn default_closed_state() -> String {
  DEFAULT_CLOSED_STATE.to_string()
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      host: None,
      closed_state: default_closed_state(),
      filter: None,
      status_labels: BTreeMap::new(),
    }
  }
}

impl TrackerConfig {
  /// Project key from the filter, or an empty string
  pub fn project(&self) -> &str {
    self.filter.as_ref().map_or("", |f| f.project_id.as_str())
  }

  pub fn status_map(&self) -> StatusMap {
    StatusMap::from(self.status_labels.clone())
  }

  /// Build an operation context for a fix version.
  ///
  /// `project` and `closed_state` override the configured values when given.
  pub fn context(&self, fix_for_version: &str, project: Option<&str>, closed_state: Option<&str>) -> Context {
    Context::new(
      project.unwrap_or(self.project()),
      fix_for_version,
      closed_state.unwrap_or(&self.closed_state),
    )
  }
}

/// Represents the configuration directory for the jrel application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Locate the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "jrel").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit configuration directory
  pub fn at(config_dir: impl AsRef<Path>) -> Self {
    Self {
      config_dir: config_dir.as_ref().to_path_buf(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("jrel.toml")
  }

  /// Load configuration from file or return default
  pub fn load_config(&self) -> Result<TrackerConfig> {
    let config_path = self.config_path();

    if !config_path.exists() {
      return Ok(TrackerConfig::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))
  }

  /// Save configuration to file
  pub fn save_config(&self, config: &TrackerConfig) -> Result<()> {
    let config_path = self.config_path();

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;

    let content = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());

    let config = config_dirs.load_config().unwrap();

    assert_eq!(config, TrackerConfig::default());
    assert_eq!(config.closed_state, "Closed");
    assert_eq!(config.project(), "");
  }

  #[test]
  fn test_load_config_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());
    fs::write(
      config_dirs.config_path(),
      r#"host = "company.atlassian.net"
closed_state = "Done"

[filter]
project_id = "ABC"

[status_labels]
"In Progress" = "Working"
"#,
    )
    .unwrap();

    let config = config_dirs.load_config().unwrap();

    assert_eq!(config.host.as_deref(), Some("company.atlassian.net"));
    assert_eq!(config.project(), "ABC");
    assert_eq!(config.status_map().display("In Progress"), "Working");

    let context = config.context("1.0", None, None);
    assert_eq!(context, Context::new("ABC", "1.0", "Done"));
  }

  #[test]
  fn test_context_overrides() {
    let config = TrackerConfig {
      filter: Some(ProjectFilter::new("ABC")),
      ..TrackerConfig::default()
    };

    let context = config.context("2.0", Some("XYZ"), Some("Resolved"));
    assert_eq!(context, Context::new("XYZ", "2.0", "Resolved"));
  }

  #[test]
  fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path().join("nested"));
    let config = TrackerConfig {
      host: Some("https://jira.example.com".to_string()),
      closed_state: "Done".to_string(),
      filter: Some(ProjectFilter::new("ABC")),
      status_labels: BTreeMap::from([("Resolved".to_string(), "Fixed".to_string())]),
    };

    config_dirs.save_config(&config).unwrap();

    assert_eq!(config_dirs.load_config().unwrap(), config);
  }

  #[test]
  fn test_invalid_toml_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_dirs = ConfigDirs::at(temp_dir.path());
    fs::write(config_dirs.config_path(), "closed_state = [").unwrap();

    let error = format!("{:#}", config_dirs.load_config().unwrap_err());
    assert!(error.contains("jrel.toml"));
  }
}
