//! # Jira Version Endpoints
//!
//! Project versions back the release lifecycle: list, create, and mark
//! released.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::client::{JiraClient, rejection_message};
use crate::models::{CreateVersionRequest, JiraVersion, ReleaseVersionRequest};

impl JiraClient {
  /// Get all versions of a project
  pub async fn get_versions(&self, project_key: &str) -> Result<Vec<JiraVersion>> {
    let url = format!("{}/rest/api/2/project/{}/versions", self.base_url, project_key);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .context("Failed to fetch Jira versions")?;

    match response.status() {
      StatusCode::OK => {
        let versions = response
          .json::<Vec<JiraVersion>>()
          .await
          .context("Failed to parse Jira versions")?;
        Ok(versions)
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

  /// Create an unreleased version in a project
  pub async fn create_version(&self, project_key: &str, name: &str) -> Result<JiraVersion> {
    let url = format!("{}/rest/api/2/version", self.base_url);

    let payload = CreateVersionRequest {
      name: name.to_string(),
      project: project_key.to_string(),
      released: false,
    };

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to create Jira version")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let version = response
          .json::<JiraVersion>()
          .await
          .context("Failed to parse created Jira version")?;
        Ok(version)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Failed to create version {} in project {}: {}",
        name,
        project_key,
        rejection_message(response).await
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Mark a version as released
  pub async fn release_version(&self, version_id: &str, release_date: Option<&str>) -> Result<()> {
    let url = format!("{}/rest/api/2/version/{}", self.base_url, version_id);

    let payload = ReleaseVersionRequest {
      released: true,
      release_date: release_date.map(str::to_string),
    };

    let response = self
      .client
      .put(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to release Jira version")?;

    match response.status() {
      StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Version {} not found", version_id)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
