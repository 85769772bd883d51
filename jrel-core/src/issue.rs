//! # Issue Model
//!
//! Read-only views over remote Jira records. Nothing here talks to the
//! network; every state change goes through [`crate::ReleaseTracker`] and is
//! observed by fetching again.

use chrono::{DateTime, Utc};
use jrel_jira::{JiraIssue, JiraTransition, JiraVersion};
use url::Url;

use crate::status::StatusMap;

/// Timestamp layout Jira uses for `created`, e.g. `2024-01-15T10:30:00.000+0000`
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// A normalized issue snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  id: String,
  issue_type: String,
  title: String,
  description: String,
  raw_status: String,
  status: String,
  closed: bool,
  submitted_date: DateTime<Utc>,
  submitter: String,
  url: String,
}

impl Issue {
  /// Project a remote issue, labelling its status and building its browse URL.
  pub fn from_remote(remote: &JiraIssue, statuses: &StatusMap, base_url: &str) -> Self {
    let fields = &remote.fields;
    let raw_status = fields.status.name.clone();

    Self {
      id: remote.key.clone(),
      issue_type: fields.issue_type.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
      title: fields.summary.clone(),
      description: fields.description.clone().unwrap_or_default(),
      status: statuses.display(&raw_status).to_string(),
      raw_status,
      closed: fields.resolution.is_some(),
      submitted_date: fields
        .created
        .as_deref()
        .and_then(parse_jira_timestamp)
        .unwrap_or_else(Utc::now),
      submitter: fields
        .reporter
        .as_ref()
        .and_then(|reporter| reporter.label())
        .unwrap_or_default()
        .to_string(),
      url: browse_url(base_url, &remote.key),
    }
  }

  /// Issue key, e.g. `ABC-123`
  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn issue_type(&self) -> &str {
    &self.issue_type
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  /// Display status, after applying the status label map
  pub fn status(&self) -> &str {
    &self.status
  }

  /// Status exactly as the tracker reports it
  pub fn raw_status(&self) -> &str {
    &self.raw_status
  }

  /// Whether the issue carries a resolution
  pub fn is_closed(&self) -> bool {
    self.closed
  }

  pub fn submitted_date(&self) -> DateTime<Utc> {
    self.submitted_date
  }

  pub fn submitter(&self) -> &str {
    &self.submitter
  }

  pub fn url(&self) -> &str {
    &self.url
  }
}

/// A project version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
  id: String,
  name: String,
  released: bool,
}

impl Version {
  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_released(&self) -> bool {
    self.released
  }

  pub(crate) fn into_released(self) -> Self {
    Self { released: true, ..self }
  }
}

impl From<JiraVersion> for Version {
  fn from(version: JiraVersion) -> Self {
    Self {
      id: version.id,
      name: version.name,
      released: version.released,
    }
  }
}

/// A workflow transition available to one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
  id: String,
  name: String,
}

impl Transition {
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Name of the status the transition leads to
  pub fn name(&self) -> &str {
    &self.name
  }
}

impl From<&JiraTransition> for Transition {
  fn from(transition: &JiraTransition) -> Self {
    Self {
      id: transition.id.clone(),
      name: transition.target_status().to_string(),
    }
  }
}

fn parse_jira_timestamp(value: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT)
    .or_else(|_| DateTime::parse_from_rfc3339(value))
    .ok()
    .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// `<base_url>/browse/<escaped key>`
fn browse_url(base_url: &str, key: &str) -> String {
  // Url::parse normalizes the base, so borrow only the escaping from it
  let escaped = Url::parse("https://escape.invalid/")
    .ok()
    .and_then(|mut url| {
      url.path_segments_mut().ok()?.pop_if_empty().push(key);
      Some(url.path().trim_start_matches('/').to_string())
    })
    .unwrap_or_else(|| key.to_string());
  format!("{base_url}/browse/{escaped}")
}
