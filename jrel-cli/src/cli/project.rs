//! Connection and project metadata commands.

use anyhow::Result;

use super::{ContextArgs, load_config};
use crate::clients::create_tracker_runtime;
use crate::output::{print_header, print_info, print_success};

pub(super) fn handle_validate_command() -> Result<()> {
  let config = load_config()?;
  let (rt, tracker) = create_tracker_runtime(&config)?;

  rt.block_on(tracker.validate_connection())?;
  print_success(&format!(
    "Connected to {}; the account can browse projects.",
    tracker.base_url()
  ));

  Ok(())
}

pub(super) fn handle_projects_command() -> Result<()> {
  let config = load_config()?;
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let categories = rt.block_on(tracker.categories())?;
  if categories.is_empty() {
    print_info("No projects are visible to this account.");
    return Ok(());
  }

  print_header("Projects");
  for category in &categories {
    println!("  {:<12} {}", category.id, category.name);
  }

  Ok(())
}

pub(super) fn handle_issue_types_command(context_args: &ContextArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let issue_types = rt.block_on(tracker.issue_types(context.project()))?;
  print_header(&format!("Issue types of {}", context.project()));
  for issue_type in issue_types.iter().filter(|t| !t.subtask) {
    println!("  {}", issue_type.name);
  }

  Ok(())
}
