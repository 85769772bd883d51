use reqwest::{Client, Response};
use tracing::warn;

use crate::consts::USER_AGENT;
use crate::models::{JiraAuth, JiraErrorResponse};

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::builder().user_agent(USER_AGENT).build().unwrap_or_else(|e| {
      warn!("Falling back to default HTTP client: {e}");
      Client::new()
    });
    Self {
      client,
      base_url: base_url.to_string(),
      auth,
    }
  }

  /// Base URL of the Jira instance this client talks to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

/// Extract the error messages Jira attached to a rejected response.
///
/// Falls back to the raw body when it is not a Jira error document.
pub(crate) async fn rejection_message(response: Response) -> String {
  let body = response.text().await.unwrap_or_default();
  match serde_json::from_str::<JiraErrorResponse>(&body) {
    Ok(error) if !error.summary().is_empty() => error.summary(),
    _ => body,
  }
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> JiraClient {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}
