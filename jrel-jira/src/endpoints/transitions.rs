//! # Jira Transition Endpoints
//!
//! The workflow transitions of one issue. Jira computes them per issue from its
//! workflow, type, and current status, so they are never shared between issues.

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use tracing::trace;

use crate::client::{JiraClient, rejection_message};
use crate::models::{JiraTransition, JiraTransitions, TransitionRequest};

impl JiraClient {
  fn transitions_url(&self, issue_key: &str) -> String {
    format!("{}/rest/api/2/issue/{}/transitions", self.base_url, issue_key)
  }

  /// Transitions the workflow currently offers for an issue, in Jira's order
  pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<JiraTransition>> {
    let response = self
      .client
      .get(self.transitions_url(issue_key))
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .send()
      .await
      .with_context(|| format!("Failed to fetch the transitions of {issue_key}"))?;

    if response.status() != StatusCode::OK {
      return Err(transition_failure(issue_key, response).await);
    }

    let transitions = response
      .json::<JiraTransitions>()
      .await
      .with_context(|| format!("Failed to parse the transitions of {issue_key}"))?
      .transitions;
    trace!("{issue_key} offers {} transitions", transitions.len());
    Ok(transitions)
  }

  /// Execute one of the issue's transitions by id
  pub async fn transition_issue(&self, issue_key: &str, transition_id: &str) -> Result<()> {
    let response = self
      .client
      .post(self.transitions_url(issue_key))
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&TransitionRequest::new(transition_id))
      .send()
      .await
      .with_context(|| format!("Failed to execute transition {transition_id} on {issue_key}"))?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      _ => Err(transition_failure(issue_key, response).await),
    }
  }
}

/// Readable error for a failed transitions request.
///
/// A 400 means Jira refused the transition for the issue's current status.
async fn transition_failure(issue_key: &str, response: Response) -> anyhow::Error {
  match response.status() {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      anyhow::anyhow!("Authentication failed. Please check your Jira credentials.")
    }
    StatusCode::NOT_FOUND => anyhow::anyhow!("Issue {issue_key} not found"),
    StatusCode::BAD_REQUEST => anyhow::anyhow!(
      "Jira refused the transition of {issue_key}: {}",
      rejection_message(response).await
    ),
    status => anyhow::anyhow!(
      "Unexpected error: HTTP {} - {}",
      status,
      response.text().await.unwrap_or_default()
    ),
  }
}

#[cfg(test)]
mod tests {
  use jrel_test_utils::jira::transitions_json;
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::{JiraClient, create_jira_client};

  fn client_for(mock_server: &MockServer) -> JiraClient {
    create_jira_client(&mock_server.uri(), "test_user", "test_token")
  }

  #[tokio::test]
  async fn test_get_transitions() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_json(&[
        ("11", "To Do"),
        ("21", "In Progress"),
        ("31", "Done"),
      ])))
      .mount(&mock_server)
      .await;

    let transitions = client.get_transitions("TEST-123").await?;
    assert_eq!(transitions.len(), 3);
    assert_eq!(transitions[0].id, "11");
    assert_eq!(transitions[0].target_status(), "To Do");
    assert_eq!(transitions[2].id, "31");
    assert_eq!(transitions[2].target_status(), "Done");

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(basic_auth("test_user", "test_token"))
      .and(body_json(serde_json::json!({
          "transition": {
              "id": "21"
          }
      })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    client.transition_issue("TEST-123", "21").await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_issue_invalid_transition() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errorMessages": ["The requested transition is not available for the current status."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let error = client.transition_issue("TEST-123", "invalid").await.unwrap_err().to_string();
    assert!(error.contains("Jira refused the transition of TEST-123"));
    assert!(error.contains("not available for the current status."));

    Ok(())
  }

  #[tokio::test]
  async fn test_transitions_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/NONEXISTENT-123/transitions"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let result = client.get_transitions("NONEXISTENT-123").await;
    assert!(result.unwrap_err().to_string().contains("not found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_transitions_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let result = client.get_transitions("TEST-123").await;
    assert!(result.unwrap_err().to_string().contains("Authentication failed"));

    Ok(())
  }
}
