use jrel_jira::consts::BROWSE_PROJECTS_PERMISSION;
use tracing::debug;

use crate::error::{ReleaseError, Result};
use crate::tracker::ReleaseTracker;

impl ReleaseTracker {
  /// Check that the tracker is reachable and the account can browse projects.
  ///
  /// Unlike the other operations, every failure here is fatal.
  pub async fn validate_connection(&self) -> Result<()> {
    let permissions = self
      .client
      .get_permissions(&[BROWSE_PROJECTS_PERMISSION])
      .await
      .map_err(|e| ReleaseError::Connection(format!("{e:#}")))?;

    let can_browse = permissions
      .iter()
      .find(|p| p.key.eq_ignore_ascii_case(BROWSE_PROJECTS_PERMISSION))
      .is_some_and(|p| p.has_permission);

    if !can_browse {
      return Err(ReleaseError::Connection(
        "The specified account cannot browse projects, therefore no issues can be viewed.".to_string(),
      ));
    }

    debug!("Connection to {} validated", self.base_url());
    Ok(())
  }
}
