//! # Jira Project Endpoints
//!
//! Project listing, issue type discovery, and project creation.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::client::{JiraClient, rejection_message};
use crate::models::{CreateProjectRequest, JiraIssueType, JiraProject, JiraProjectDetail};

impl JiraClient {
  /// Get all projects visible to the authenticated user
  pub async fn get_projects(&self) -> Result<Vec<JiraProject>> {
    let url = format!("{}/rest/api/2/project", self.base_url);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .context("Failed to fetch Jira projects")?;

    match response.status() {
      StatusCode::OK => {
        let projects = response
          .json::<Vec<JiraProject>>()
          .await
          .context("Failed to parse Jira projects")?;
        Ok(projects)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Get the issue types available in a project
  pub async fn get_issue_types(&self, project_key: &str) -> Result<Vec<JiraIssueType>> {
    let url = format!("{}/rest/api/2/project/{}", self.base_url, project_key);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .context("Failed to fetch Jira project")?;

    match response.status() {
      StatusCode::OK => {
        let project = response
          .json::<JiraProjectDetail>()
          .await
          .context("Failed to parse Jira project")?;
        Ok(project.issue_types)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Project {} not found", project_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Create a project led by the given user
  pub async fn create_project(&self, key: &str, name: &str, project_type_key: &str, lead: &str) -> Result<JiraProject> {
    let url = format!("{}/rest/api/2/project", self.base_url);

    let payload = CreateProjectRequest {
      key: key.to_string(),
      name: name.to_string(),
      project_type_key: project_type_key.to_string(),
      lead: lead.to_string(),
    };

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to create Jira project")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        // The create response only carries id and key
        let created = response
          .json::<serde_json::Value>()
          .await
          .context("Failed to parse created Jira project")?;
        let id = created
          .get("id")
          .map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
          })
          .unwrap_or_default();
        Ok(JiraProject {
          id,
          key: key.to_string(),
          name: name.to_string(),
        })
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Failed to create project {}: {}",
        key,
        rejection_message(response).await
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
