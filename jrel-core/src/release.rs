//! # Release Manager
//!
//! Versions are resolved by exact name against a freshly fetched version list
//! on every call; there is no cache, so results always reflect the tracker at
//! call time.

use chrono::Local;
use tracing::{debug, info};

use crate::context::Context;
use crate::error::{ReleaseError, Result};
use crate::issue::Version;
use crate::tracker::ReleaseTracker;

/// What a release operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
  /// The version was already present
  AlreadyExists(Version),
  /// The version was created
  Created(Version),
  /// The version was already released
  AlreadyReleased(Version),
  /// The version was marked released
  Released(Version),
}

impl ReleaseOutcome {
  pub fn version(&self) -> &Version {
    match self {
      Self::AlreadyExists(version)
      | Self::Created(version)
      | Self::AlreadyReleased(version)
      | Self::Released(version) => version,
    }
  }

  /// Whether the tracker was modified
  pub fn changed(&self) -> bool {
    matches!(self, Self::Created(_) | Self::Released(_))
  }
}

/// Fail with [`ReleaseError::InvalidState`] when the context names no project.
pub(crate) fn require_project(context: &Context) -> Result<()> {
  if context.project().is_empty() {
    return Err(ReleaseError::InvalidState(
      "A project must be specified in the project filter to manage releases.".to_string(),
    ));
  }
  Ok(())
}

impl ReleaseTracker {
  /// Create the context's fix version unless it already exists.
  pub async fn create_release(&self, context: &Context) -> Result<ReleaseOutcome> {
    if let Some(version) = self.try_get_version(context).await? {
      debug!("Version {} already exists in {}", version.name(), context.project());
      return Ok(ReleaseOutcome::AlreadyExists(version));
    }

    let created = self
      .client
      .create_version(context.project(), context.fix_for_version())
      .await?;
    info!("Created version {} in {}", created.name, context.project());

    Ok(ReleaseOutcome::Created(created.into()))
  }

  /// Mark the context's fix version released unless it already is.
  pub async fn deploy_release(&self, context: &Context) -> Result<ReleaseOutcome> {
    let Some(version) = self.try_get_version(context).await? else {
      return Err(ReleaseError::InvalidState(format!(
        "Version {} does not exist.",
        context.fix_for_version()
      )));
    };

    if version.is_released() {
      debug!("Version {} is already released", version.name());
      return Ok(ReleaseOutcome::AlreadyReleased(version));
    }

    let release_date = Local::now().date_naive().format("%Y-%m-%d").to_string();
    self.client.release_version(version.id(), Some(&release_date)).await?;
    info!("Released version {} of {}", version.name(), context.project());

    Ok(ReleaseOutcome::Released(version.into_released()))
  }

  /// Look up the context's fix version by exact name.
  pub async fn try_get_version(&self, context: &Context) -> Result<Option<Version>> {
    if context.fix_for_version().is_empty() {
      return Err(ReleaseError::InvalidArgument(
        "A fix-for version must be specified.".to_string(),
      ));
    }
    require_project(context)?;

    let versions = self.client.get_versions(context.project()).await?;
    Ok(
      versions
        .into_iter()
        .find(|v| v.name == context.fix_for_version())
        .map(Version::from),
    )
  }

  /// All versions of a project
  pub async fn project_versions(&self, project_key: &str) -> Result<Vec<Version>> {
    let versions = self.client.get_versions(project_key).await?;
    Ok(versions.into_iter().map(Version::from).collect())
  }
}
