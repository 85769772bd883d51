//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations, including fetching,
//! searching, creating, and commenting on Jira issues.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::warn;

use crate::client::{JiraClient, rejection_message};
use crate::consts::MAX_SEARCH_RESULTS;
use crate::jql;
use crate::models::{
  CommentRequest, CreateIssueFields, CreateIssueRequest, CreatedIssue, JiraIssue, JiraSearchResults, KeyRef, NameRef,
  SearchRequest,
};

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    let url = format!("{}/rest/api/2/issue/{}", self.base_url, issue_key);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => {
        let issue = response
          .json::<JiraIssue>()
          .await
          .context("Failed to parse Jira issue")?;
        Ok(issue)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Get the issues of a project scheduled for a fix version
  pub async fn get_issues(&self, project_key: &str, version_name: &str) -> Result<Vec<JiraIssue>> {
    let url = format!("{}/rest/api/2/search", self.base_url);
    let query = jql::project_fix_version(project_key, version_name);
    let max_results = MAX_SEARCH_RESULTS.to_string();

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[("jql", query.as_str()), ("maxResults", max_results.as_str())])
      .send()
      .await
      .context("Failed to fetch Jira issues")?;

    match response.status() {
      StatusCode::OK => {
        let results = response
          .json::<JiraSearchResults>()
          .await
          .context("Failed to parse Jira issues")?;
        Ok(search_page(results, &query))
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Invalid issue search: {}",
        rejection_message(response).await
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Search issues with an arbitrary JQL query
  pub async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
    let url = format!("{}/rest/api/2/search", self.base_url);

    let payload = SearchRequest {
      jql: jql.to_string(),
      start_at: 0,
      max_results: MAX_SEARCH_RESULTS,
    };

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to search Jira issues")?;

    match response.status() {
      StatusCode::OK => {
        let results = response
          .json::<JiraSearchResults>()
          .await
          .context("Failed to parse Jira search results")?;
        Ok(search_page(results, jql))
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Invalid JQL query '{}': {}",
        jql,
        rejection_message(response).await
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Add a comment to an issue
  pub async fn add_comment(&self, issue_key: &str, body: &str) -> Result<()> {
    let url = format!("{}/rest/api/2/issue/{}/comment", self.base_url, issue_key);

    let payload = CommentRequest { body: body.to_string() };

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to comment on Jira issue")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Create an issue in a project, optionally scheduled for a fix version
  pub async fn create_issue(
    &self,
    project_key: &str,
    summary: &str,
    description: Option<&str>,
    issue_type: &str,
    fix_version: Option<&str>,
  ) -> Result<CreatedIssue> {
    let url = format!("{}/rest/api/2/issue", self.base_url);

    let payload = CreateIssueRequest {
      fields: CreateIssueFields {
        project: KeyRef {
          key: project_key.to_string(),
        },
        summary: summary.to_string(),
        description: description.map(str::to_string),
        issue_type: NameRef {
          name: issue_type.to_string(),
        },
        fix_versions: fix_version
          .map(|name| NameRef { name: name.to_string() })
          .into_iter()
          .collect(),
      },
    };

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&payload)
      .send()
      .await
      .context("Failed to create Jira issue")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let created = response
          .json::<CreatedIssue>()
          .await
          .context("Failed to parse created Jira issue")?;
        Ok(created)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the new issue: {}",
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

/// Issues of a single search response, warning when the server cut it short
fn search_page(results: JiraSearchResults, jql: &str) -> Vec<JiraIssue> {
  if results.is_truncated() {
    warn!(
      "Jira returned {} of {} issues for '{}'; the remaining issues are not included",
      results.issues.len(),
      results.total,
      jql
    );
  }
  results.issues
}
