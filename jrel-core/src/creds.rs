//! # Credentials
//!
//! Jira credentials are read from the user's `.netrc`. The machine entry for
//! the Jira host wins; `atlassian.net` serves as a catch-all for Jira Cloud.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jrel_jira::{JiraClient, create_jira_client};
use tracing::debug;

/// Machine entry consulted when the host has none of its own
const FALLBACK_MACHINE: &str = "atlassian.net";

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses `.netrc` content and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. A machine without both `login` and `password` yields
/// `None`.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut machine: Option<&str> = None;
  let mut username: Option<&str> = None;
  let mut password: Option<&str> = None;

  let finish = |machine: Option<&str>, username: Option<&str>, password: Option<&str>| {
    match (machine, username, password) {
      (Some(m), Some(u), Some(p)) if m == target_machine => Some(Credentials {
        username: u.to_string(),
        password: p.to_string(),
      }),
      _ => None,
    }
  };

  while let Some(token) = tokens.next() {
    match token {
      "machine" | "default" => {
        if let Some(creds) = finish(machine, username, password) {
          return Some(creds);
        }
        machine = if token == "machine" { tokens.next() } else { None };
        username = None;
        password = None;
      }
      "login" => username = tokens.next(),
      "password" => password = tokens.next(),
      _ => {}
    }
  }

  finish(machine, username, password)
}

/// Reads the `.netrc` file and returns credentials for the requested machine.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  if !path.exists() {
    return Ok(None);
  }
  let content = fs::read_to_string(path).context("Failed to read .netrc file")?;
  Ok(parse_netrc(&content, target_machine))
}

/// Strip scheme and trailing slashes so a base URL matches a netrc machine name.
pub fn normalize_host(raw_host: &str) -> String {
  raw_host
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/')
    .to_string()
}

/// Retrieve Jira credentials for the provided host.
pub fn get_jira_credentials(home: &Path, jira_host: &str) -> Result<Credentials> {
  let netrc_path = get_netrc_path(home);
  let normalized_host = normalize_host(jira_host);

  for machine in [normalized_host.as_str(), FALLBACK_MACHINE] {
    if let Some(creds) = parse_netrc_file(&netrc_path, machine)? {
      debug!("Using .netrc credentials for machine {machine}");
      return Ok(creds);
    }
  }

  Err(anyhow::anyhow!(
    "Jira credentials not found in .netrc file. Please add credentials for machine '{normalized_host}' or '{FALLBACK_MACHINE}'."
  ))
}

/// Creates an authenticated Jira client using credentials from .netrc.
pub fn create_jira_client_from_netrc(home: &Path, jira_host: &str) -> Result<JiraClient> {
  let credentials = get_jira_credentials(home, jira_host).context("Failed to get credentials")?;

  Ok(create_jira_client(
    jira_host,
    &credentials.username,
    &credentials.password,
  ))
}
