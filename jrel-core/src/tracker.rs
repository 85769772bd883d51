//! # Release Tracker
//!
//! [`ReleaseTracker`] wraps the Jira gateway with the release workflow rules.
//! Its operations are spread over the `transition`, `release`, `query`, and
//! `validate` modules; this module holds the struct and the plain issue
//! operations (comments, issue creation, project metadata).

use jrel_jira::{JiraClient, JiraIssueType, JiraProject};
use tracing::{debug, info};

use crate::context::Context;
use crate::error::{Result, require_text};
use crate::issue::Issue;
use crate::status::StatusMap;

/// Release workflow client for one Jira instance
pub struct ReleaseTracker {
  pub(crate) client: JiraClient,
  pub(crate) statuses: StatusMap,
}

impl ReleaseTracker {
  /// Create a tracker over an authenticated client
  pub fn new(client: JiraClient, statuses: StatusMap) -> Self {
    Self { client, statuses }
  }

  /// Base URL of the tracked Jira instance
  pub fn base_url(&self) -> &str {
    self.client.base_url()
  }

  pub fn statuses(&self) -> &StatusMap {
    &self.statuses
  }

  /// Fetch a single issue
  pub async fn issue(&self, issue_id: &str) -> Result<Issue> {
    let remote = self.client.get_issue(issue_id).await?;
    Ok(self.to_issue(&remote))
  }

  /// Add a comment to an issue
  pub async fn add_comment(&self, issue_id: &str, text: &str) -> Result<()> {
    require_text(text, "The comment")?;
    self.client.add_comment(issue_id, text).await?;
    debug!("Added comment to {issue_id}");
    Ok(())
  }

  /// Create an issue in the context's project, scheduled for its fix version.
  pub async fn create_issue(&self, context: &Context, title: &str, description: &str, issue_type: &str) -> Result<Issue> {
    require_text(title, "The issue title")?;
    require_text(issue_type, "The issue type")?;
    crate::release::require_project(context)?;

    let description = Some(description).filter(|d| !d.is_empty());
    let fix_version = Some(context.fix_for_version()).filter(|v| !v.is_empty());
    let created = self
      .client
      .create_issue(context.project(), title, description, issue_type, fix_version)
      .await?;
    info!("Created {} in {}", created.key, context.project());

    self.issue(&created.key).await
  }

  /// Issue types available in a project
  pub async fn issue_types(&self, project_key: &str) -> Result<Vec<JiraIssueType>> {
    Ok(self.client.get_issue_types(project_key).await?)
  }

  /// Projects visible to the authenticated user
  pub async fn projects(&self) -> Result<Vec<JiraProject>> {
    Ok(self.client.get_projects().await?)
  }

  /// Create a project
  pub async fn create_project(&self, key: &str, name: &str, project_type_key: &str, lead: &str) -> Result<JiraProject> {
    require_text(key, "The project key")?;
    require_text(name, "The project name")?;
    let project = self.client.create_project(key, name, project_type_key, lead).await?;
    info!("Created project {}", project.key);
    Ok(project)
  }

  pub(crate) fn to_issue(&self, remote: &jrel_jira::JiraIssue) -> Issue {
    Issue::from_remote(remote, &self.statuses, self.client.base_url())
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use jrel_jira::create_jira_client;
  use jrel_test_utils::jira::issue_json;
  use wiremock::matchers::{body_partial_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::error::ReleaseError;

  pub(crate) fn tracker_for(mock_server: &MockServer) -> ReleaseTracker {
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");
    ReleaseTracker::new(client, StatusMap::new())
  }

  #[tokio::test]
  async fn test_issue_applies_status_labels() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), "test_user", "test_token");
    let tracker = ReleaseTracker::new(client, StatusMap::new().with_label("Open", "New"));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/ABC-1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue_json("ABC-1", "Open")))
      .mount(&mock_server)
      .await;

    let issue = tracker.issue("ABC-1").await?;
    assert_eq!(issue.status(), "New");
    assert_eq!(issue.raw_status(), "Open");
    assert_eq!(issue.url(), format!("{}/browse/ABC-1", mock_server.uri()));

    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_uses_context() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(body_partial_json(serde_json::json!({
          "fields": {
              "project": { "key": "ABC" },
              "issuetype": { "name": "Task" },
              "fixVersions": [{ "name": "1.0" }]
          }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "10005", "key": "ABC-5" })))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/ABC-5"))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue_json("ABC-5", "Open")))
      .mount(&mock_server)
      .await;

    let context = Context::new("ABC", "1.0", "Done");
    let issue = tracker.create_issue(&context, "Ship it", "", "Task").await?;
    assert_eq!(issue.id(), "ABC-5");
    assert_eq!(issue.status(), "Open");

    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_requires_title() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    let context = Context::new("ABC", "1.0", "Done");
    let result = tracker.create_issue(&context, " ", "", "Task").await;
    assert!(matches!(result, Err(ReleaseError::InvalidArgument(_))));

    Ok(())
  }

  #[tokio::test]
  async fn test_add_comment() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/ABC-1/comment"))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "1" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    tracker.add_comment("ABC-1", "Released in 1.0").await?;

    Ok(())
  }
}
