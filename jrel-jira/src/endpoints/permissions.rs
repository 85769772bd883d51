use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::client::JiraClient;
use crate::models::{JiraPermission, JiraPermissions};

impl JiraClient {
  /// Get the authenticated user's grants for the given permission keys.
  ///
  /// Jira Cloud rejects the request unless at least one key is named.
  pub async fn get_permissions(&self, keys: &[&str]) -> Result<Vec<JiraPermission>> {
    let url = format!("{}/rest/api/2/mypermissions", self.base_url);
    let keys = keys.join(",");

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[("permissions", keys.as_str())])
      .send()
      .await
      .context("Failed to connect to Jira")?;

    match response.status() {
      StatusCode::OK => {
        let permissions = response
          .json::<JiraPermissions>()
          .await
          .context("Failed to parse Jira permissions")?;
        let mut grants: Vec<_> = permissions.permissions.into_values().collect();
        grants.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(grants)
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
}
