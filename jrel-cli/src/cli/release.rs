//! Release commands: create, deploy, and list versions.

use anyhow::Result;
use jrel_core::ReleaseOutcome;

use super::{ContextArgs, load_config};
use crate::clients::create_tracker_runtime;
use crate::output::{format_version, print_header, print_info, print_success};

pub(super) fn handle_create_release_command(context_args: &ContextArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let outcome = rt.block_on(tracker.create_release(&context))?;
  report_release(context.project(), &outcome);

  Ok(())
}

pub(super) fn handle_deploy_release_command(context_args: &ContextArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let outcome = rt.block_on(tracker.deploy_release(&context))?;
  report_release(context.project(), &outcome);

  Ok(())
}

pub(super) fn handle_versions_command(context_args: &ContextArgs) -> Result<()> {
  let config = load_config()?;
  let context = context_args.resolve(&config);
  let (rt, tracker) = create_tracker_runtime(&config)?;

  let versions = rt.block_on(tracker.project_versions(context.project()))?;
  if versions.is_empty() {
    print_info(&format!("Project {} has no versions.", context.project()));
    return Ok(());
  }

  print_header(&format!("Versions of {}", context.project()));
  for version in &versions {
    println!("  {}", format_version(version.name(), version.is_released()));
  }

  Ok(())
}

fn report_release(project: &str, outcome: &ReleaseOutcome) {
  let name = outcome.version().name();
  match outcome {
    ReleaseOutcome::AlreadyExists(_) => print_info(&format!("Version {name} already exists in {project}")),
    ReleaseOutcome::Created(_) => print_success(&format!("Created version {name} in {project}")),
    ReleaseOutcome::AlreadyReleased(_) => print_info(&format!("Version {name} is already released")),
    ReleaseOutcome::Released(_) => print_success(&format!("Released version {name} of {project}")),
  }
}
