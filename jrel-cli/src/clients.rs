//! # Client Factory
//!
//! Builds the async runtime and the authenticated release tracker shared by
//! every command.

use anyhow::{Context as _, Result};
use directories::BaseDirs;
use jrel_core::creds::create_jira_client_from_netrc;
use jrel_core::url::resolve_jira_base_url;
use jrel_core::{ReleaseTracker, TrackerConfig};
use tokio::runtime::Runtime;
use tracing::debug;

/// Create a runtime and a tracker for the configured Jira host.
///
/// The host comes from `$JIRA_HOST` or the config file; credentials come from
/// `~/.netrc`.
pub fn create_tracker_runtime(config: &TrackerConfig) -> Result<(Runtime, ReleaseTracker)> {
  let base_dirs = BaseDirs::new().context("Failed to get $HOME directory")?;
  let jira_host = resolve_jira_base_url(config.host.as_deref())?;
  debug!("Using Jira host {jira_host}");

  let client = create_jira_client_from_netrc(base_dirs.home_dir(), &jira_host)?;
  let rt = Runtime::new().context("Failed to create async runtime")?;

  Ok((rt, ReleaseTracker::new(client, config.status_map())))
}
