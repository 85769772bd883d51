//! # Transition Engine
//!
//! Moves issues through their Jira workflow. Legal transitions are always
//! fetched live for the one issue being changed, since workflows differ by
//! project and issue type.
//!
//! A transition that the workflow does not allow is not an error: it is
//! logged and returned as [`TransitionOutcome::Rejected`], so batch operations
//! keep going.

use std::fmt;

use tracing::{debug, error, info};

use crate::context::Context;
use crate::error::{Result, require_text};
use crate::issue::{Issue, Transition};
use crate::status::same_status;
use crate::tracker::ReleaseTracker;

/// A status change the current workflow does not permit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalTransition {
  /// Issue that was to be changed
  pub issue_id: String,
  /// Status that was asked for
  pub requested: String,
  /// Target statuses the workflow currently allows, in tracker order
  pub allowed: Vec<String>,
}

impl fmt::Display for IllegalTransition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Changing the status of {} to {} is not permitted in the current workflow. The only permitted statuses are: {}",
      self.issue_id,
      self.requested,
      self.allowed.join(", ")
    )
  }
}

/// Result of asking for a status change on one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
  /// The issue already was in the requested status
  Unchanged,
  /// The transition was executed
  Transitioned { transition_id: String, status: String },
  /// The issue was not in the status a batch was filtering on
  Skipped { status: String },
  /// The workflow does not allow the change
  Rejected(IllegalTransition),
}

impl TransitionOutcome {
  pub fn is_rejected(&self) -> bool {
    matches!(self, Self::Rejected(_))
  }
}

/// Outcome of one issue within a batch transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTransition {
  pub issue_id: String,
  pub outcome: TransitionOutcome,
}

impl ReleaseTracker {
  /// Move an issue to `target_status`.
  ///
  /// Matching is case-insensitive and always against the raw remote status.
  pub async fn transition_issue(&self, issue: &Issue, target_status: &str) -> Result<TransitionOutcome> {
    require_text(target_status, "The status being applied")?;

    if same_status(issue.raw_status(), target_status) {
      debug!("{} is already in the {} status.", issue.id(), target_status);
      return Ok(TransitionOutcome::Unchanged);
    }

    self.change_status(issue.id(), target_status).await
  }

  /// Fetch an issue by id and move it to `target_status`.
  pub async fn transition_issue_by_id(&self, issue_id: &str, target_status: &str) -> Result<TransitionOutcome> {
    require_text(target_status, "The status being applied")?;
    let issue = self.issue(issue_id).await?;
    self.transition_issue(&issue, target_status).await
  }

  /// Move every issue of the context from `from_status` to `to_status`.
  ///
  /// An empty `from_status` selects all issues. Issues are processed in
  /// enumeration order, one at a time; a rejected transition is recorded and
  /// the batch continues.
  pub async fn transition_issues_in_status(
    &self,
    context: &Context,
    from_status: &str,
    to_status: &str,
  ) -> Result<Vec<IssueTransition>> {
    require_text(to_status, "The status being applied")?;

    let mut report = Vec::new();
    for issue in self.enumerate_issues(context).await? {
      let outcome = if !from_status.is_empty() && !same_status(issue.raw_status(), from_status) {
        debug!(
          "{} ({}) is not in the {} status, and will not be changed.",
          issue.id(),
          issue.status(),
          from_status
        );
        TransitionOutcome::Skipped {
          status: issue.raw_status().to_string(),
        }
      } else {
        self.transition_issue(&issue, to_status).await?
      };

      report.push(IssueTransition {
        issue_id: issue.id().to_string(),
        outcome,
      });
    }

    Ok(report)
  }

  /// Move an issue to the context's closed state.
  pub async fn close_issue(&self, context: &Context, issue_id: &str) -> Result<TransitionOutcome> {
    require_text(context.closed_state(), "The closed state")?;

    let transitions = self.client.get_transitions(issue_id).await?;
    match transitions
      .iter()
      .find(|t| same_status(t.target_status(), context.closed_state()))
    {
      Some(transition) => {
        self.client.transition_issue(issue_id, &transition.id).await?;
        info!("Closed {} ({})", issue_id, transition.target_status());
        Ok(TransitionOutcome::Transitioned {
          transition_id: transition.id.clone(),
          status: transition.target_status().to_string(),
        })
      }
      None => {
        error!(
          "Cannot close issue {} because the issue cannot be transitioned to the configured closed state on the provider: {}",
          issue_id,
          context.closed_state()
        );
        Ok(TransitionOutcome::Rejected(IllegalTransition {
          issue_id: issue_id.to_string(),
          requested: context.closed_state().to_string(),
          allowed: transitions.iter().map(|t| t.target_status().to_string()).collect(),
        }))
      }
    }
  }

  /// Transitions currently available to one issue
  pub async fn issue_transitions(&self, issue_id: &str) -> Result<Vec<Transition>> {
    let transitions = self.client.get_transitions(issue_id).await?;
    Ok(transitions.iter().map(Transition::from).collect())
  }

  async fn change_status(&self, issue_id: &str, to_status: &str) -> Result<TransitionOutcome> {
    debug!("Changing {issue_id} to {to_status} status...");

    let transitions = self.client.get_transitions(issue_id).await?;
    let Some(transition) = transitions.iter().find(|t| same_status(t.target_status(), to_status)) else {
      let illegal = IllegalTransition {
        issue_id: issue_id.to_string(),
        requested: to_status.to_string(),
        allowed: transitions.iter().map(|t| t.target_status().to_string()).collect(),
      };
      error!("{illegal}");
      return Ok(TransitionOutcome::Rejected(illegal));
    };

    self.client.transition_issue(issue_id, &transition.id).await?;
    info!("Changed {} to {}", issue_id, transition.target_status());

    Ok(TransitionOutcome::Transitioned {
      transition_id: transition.id.clone(),
      status: transition.target_status().to_string(),
    })
  }
}
