//! Issue commands: listing, transitions, comments, and issue creation.

use anyhow::Result;
use clap::Args;
use jrel_core::{Issue, IssueQuery, IssueTransition, TransitionOutcome};

use super::{ContextArgs, load_config};
use crate::clients::create_tracker_runtime;
use crate::output::{
  format_issue_key, format_status, format_url, print_error, print_header, print_info, print_success, print_warning,
};

#[derive(Args)]
pub struct IssuesArgs {
  /// Raw JQL condition; switches to a search
  #[arg(long, short = 'q', value_name = "JQL")]
  pub query: Option<String>,

  /// Only issues in this status (repeatable); switches to a search
  #[arg(long, short = 's', value_name = "STATUS")]
  pub status: Vec<String>,

  /// Only issues of this type (repeatable); switches to a search
  #[arg(long = "type", short = 't', value_name = "TYPE")]
  pub issue_type: Vec<String>,

  /// Ordering for searches, e.g. "key ASC"
  #[arg(long = "order-by", value_name = "JQL")]
  pub order_by: Option<String>,
}

impl IssuesArgs {
  fn is_search(&self) -> bool {
    self.query.is_some() || !self.status.is_empty() || !self.issue_type.is_empty() || self.order_by.is_some()
  }
}

#[derive(Args)]
pub struct TransitionsArgs {
  /// Issue to list transitions for
  #[arg(value_name = "ISSUE")]
  pub issue: Option<String>,
}

#[derive(Args)]
pub struct TransitionArgs {
  /// Issue key, e.g. ABC-123
  #[arg(required = true, value_name = "ISSUE")]
  pub issue: String,

  /// Target status name
  #[arg(required = true, value_name = "STATUS")]
  pub status: String,
}

#[derive(Args)]
pub struct TransitionAllArgs {
  /// Target status name
  #[arg(long, required = true, value_name = "STATUS")]
  pub to: String,

  /// Only move issues currently in this status
  #[arg(long, value_name = "STATUS")]
  pub from: Option<String>,
}

#[derive(Args)]
pub struct CloseArgs {
  /// Issue key, e.g. ABC-123
  #[arg(required = true, value_name = "ISSUE")]
  pub issue: String,
}

#[derive(Args)]
pub struct CommentArgs {
  /// Issue key, e.g. ABC-123
  #[arg(required = true, value_name = "ISSUE")]
  pub issue: String,

  /// Comment body
  #[arg(required = true, value_name = "TEXT")]
  pub text: String,
}

#[derive(Args)]
pub struct CreateIssueArgs {
  /// Issue summary
  #[arg(required = true, value_name = "TITLE")]
  pub title: String,

  /// Issue description
  #[arg(long, short = 'd', default_value = "")]
  pub description: String,

  /// Issue type name
  #[arg(long = "type", short = 't', default_value = "Task")]
  pub issue_type: String,
}

pub(super) fn handle_issues_command(context_args: &ContextArgs, args: IssuesArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let issues = if args.is_search() {
    let mut query = IssueQuery::for_context(&context);
    for status in &args.status {
      query = query.status(status);
    }
    for issue_type in &args.issue_type {
      query = query.issue_type(issue_type);
    }
    if let Some(clause) = &args.query {
      query = query.clause(clause);
    }
    if let Some(order_by) = &args.order_by {
      query = query.order_by(order_by);
    }
    rt.block_on(tracker.search_issues_matching(&query))?
  } else {
    rt.block_on(tracker.enumerate_issues(&context))?
  };

  if issues.is_empty() {
    print_info("No issues found.");
    return Ok(());
  }

  print_header(&format!("Issues ({})", issues.len()));
  for issue in &issues {
    print_issue(issue);
  }

  Ok(())
}

pub(super) fn handle_transitions_command(context_args: &ContextArgs, args: TransitionsArgs) -> Result<()> {
  let config = load_config()?;
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let transitions = match &args.issue {
    Some(issue) => rt.block_on(tracker.issue_transitions(issue))?,
    None => rt.block_on(tracker.get_transitions(&context_args.resolve(&config)))?,
  };

  if transitions.is_empty() {
    print_info("No transitions available.");
    return Ok(());
  }

  print_header("Available transitions");
  for transition in &transitions {
    println!("  {} (id: {})", transition.name(), transition.id());
  }

  Ok(())
}

pub(super) fn handle_transition_command(args: TransitionArgs) -> Result<()> {
  let config = load_config()?;
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let outcome = rt.block_on(tracker.transition_issue_by_id(&args.issue, &args.status))?;
  report_outcome(&args.issue, &outcome);

  Ok(())
}

pub(super) fn handle_transition_all_command(context_args: &ContextArgs, args: TransitionAllArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let from = args.from.as_deref().unwrap_or_default();
  let report = rt.block_on(tracker.transition_issues_in_status(&context, from, &args.to))?;

  if report.is_empty() {
    print_info("No issues to transition.");
    return Ok(());
  }

  for IssueTransition { issue_id, outcome } in &report {
    report_outcome(issue_id, outcome);
  }

  let rejected = report.iter().filter(|r| r.outcome.is_rejected()).count();
  if rejected > 0 {
    print_warning(&format!("{rejected} of {} issues could not be transitioned.", report.len()));
  }

  Ok(())
}

pub(super) fn handle_close_command(context_args: &ContextArgs, args: CloseArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let outcome = rt.block_on(tracker.close_issue(&context, &args.issue))?;
  match &outcome {
    TransitionOutcome::Rejected(illegal) => print_error(&format!(
      "Cannot close issue {} because the issue cannot be transitioned to the configured closed state on the provider: {}",
      args.issue, illegal.requested
    )),
    other => report_outcome(&args.issue, other),
  }

  Ok(())
}

pub(super) fn handle_comment_command(args: CommentArgs) -> Result<()> {
  let config = load_config()?;
  let (rt, tracker) = create_tracker_runtime(&config)?;

  rt.block_on(tracker.add_comment(&args.issue, &args.text))?;
  print_success(&format!("Added comment to {}", format_issue_key(&args.issue)));

  Ok(())
}

pub(super) fn handle_create_issue_command(context_args: &ContextArgs, args: CreateIssueArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let issue = rt.block_on(tracker.create_issue(&context, &args.title, &args.description, &args.issue_type))?;
  print_success(&format!("Created {}", format_issue_key(issue.id())));
  print_issue(&issue);

  Ok(())
}

fn print_issue(issue: &Issue) {
  println!(
    "  {} [{}] {}",
    format_issue_key(issue.id()),
    format_status(issue.status(), issue.is_closed()),
    issue.title()
  );
  println!("      {}", format_url(issue.url()));
}

fn report_outcome(issue_id: &str, outcome: &TransitionOutcome) {
  let key = format_issue_key(issue_id);
  match outcome {
    TransitionOutcome::Unchanged => print_info(&format!("{key} is already in the requested status")),
    TransitionOutcome::Transitioned { status, .. } => print_success(&format!("Moved {key} to {status}")),
    TransitionOutcome::Skipped { status } => print_info(&format!("Skipped {key} ({status})")),
    TransitionOutcome::Rejected(illegal) => print_error(&illegal.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn issues_args() -> IssuesArgs {
    IssuesArgs {
      query: None,
      status: Vec::new(),
      issue_type: Vec::new(),
      order_by: None,
    }
  }

  #[test]
  fn test_issues_without_filters_enumerates_version() {
    assert!(!issues_args().is_search());
  }

  #[test]
  fn test_issues_with_filters_searches() {
    let args = IssuesArgs {
      status: vec!["Open".to_string()],
      ..issues_args()
    };
    assert!(args.is_search());

    let args = IssuesArgs {
      query: Some("labels = hotfix".to_string()),
      ..issues_args()
    };
    assert!(args.is_search());
  }
}
