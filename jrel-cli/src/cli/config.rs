//! The `config` command.

use anyhow::{Result, bail};
use clap::Args;
use jrel_core::filter::{CATEGORY_TYPE_NAMES, to_category_ids};
use jrel_core::url::ensure_url_scheme;
use jrel_core::{ProjectFilter, TrackerConfig, get_config_dirs};

use super::ContextArgs;
use crate::output::{print_header, print_info, print_success};

#[derive(Args)]
pub struct ConfigArgs {
  /// Jira host, e.g. company.atlassian.net
  #[arg(long, value_name = "HOST")]
  pub host: Option<String>,

  /// Status display label as REMOTE=DISPLAY (repeatable)
  #[arg(long = "label", value_name = "REMOTE=DISPLAY")]
  pub labels: Vec<String>,

  /// Show the current configuration
  #[arg(long)]
  pub show: bool,
}

/// Apply `--project` and `--closed-state` as well as this command's options,
/// then save.
pub(super) fn handle_config_command(context_args: &ContextArgs, args: ConfigArgs) -> Result<()> {
  let config_dirs = get_config_dirs()?;
  let mut config = config_dirs.load_config()?;

  let changed = apply_changes(&mut config, context_args, &args)?;
  if changed {
    config_dirs.save_config(&config)?;
    print_success(&format!("Saved {}", config_dirs.config_path().display()));
  }

  if args.show || !changed {
    show_config(&config);
  }

  Ok(())
}

fn apply_changes(config: &mut TrackerConfig, context_args: &ContextArgs, args: &ConfigArgs) -> Result<bool> {
  let mut changed = false;

  if let Some(host) = &args.host {
    config.host = Some(ensure_url_scheme(host)?);
    changed = true;
  }
  if let Some(project) = &context_args.project {
    config.filter = Some(ProjectFilter::new(project.clone()));
    changed = true;
  }
  if let Some(closed_state) = &context_args.closed_state {
    config.closed_state = closed_state.clone();
    changed = true;
  }
  for label in &args.labels {
    let Some((remote, display)) = label.split_once('=') else {
      bail!("Invalid label '{label}'. Expected REMOTE=DISPLAY.");
    };
    config
      .status_labels
      .insert(remote.trim().to_string(), display.trim().to_string());
    changed = true;
  }

  Ok(changed)
}

fn show_config(config: &TrackerConfig) {
  print_header("Configuration");
  println!("  Host:         {}", config.host.as_deref().unwrap_or("(not set)"));
  match &config.filter {
    Some(filter) => println!(
      "  Filter:       {} ({}: {})",
      filter.description(),
      CATEGORY_TYPE_NAMES[0],
      to_category_ids(Some(filter)).unwrap_or_default().join(", ")
    ),
    None => println!("  Filter:       (not set)"),
  }
  println!("  Closed state: {}", config.closed_state);

  if config.status_labels.is_empty() {
    print_info("No status labels configured.");
  } else {
    println!("  Status labels:");
    for (remote, display) in &config.status_labels {
      println!("    {remote} -> {display}");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config_args(host: Option<&str>, labels: &[&str]) -> ConfigArgs {
    ConfigArgs {
      host: host.map(str::to_string),
      labels: labels.iter().map(|l| l.to_string()).collect(),
      show: false,
    }
  }

  #[test]
  fn test_apply_changes_sets_fields() -> anyhow::Result<()> {
    let mut config = TrackerConfig::default();
    let context_args = ContextArgs {
      project: Some("ABC".to_string()),
      closed_state: Some("Done".to_string()),
      ..ContextArgs::default()
    };

    let changed = apply_changes(
      &mut config,
      &context_args,
      &config_args(Some("company.atlassian.net"), &["In Progress = Working"]),
    )?;

    assert!(changed);
    assert_eq!(config.host.as_deref(), Some("https://company.atlassian.net"));
    assert_eq!(config.project(), "ABC");
    assert_eq!(config.closed_state, "Done");
    assert_eq!(config.status_labels.get("In Progress").map(String::as_str), Some("Working"));
    Ok(())
  }

  #[test]
  fn test_apply_changes_without_options_is_unchanged() -> anyhow::Result<()> {
    let mut config = TrackerConfig::default();

    let changed = apply_changes(&mut config, &ContextArgs::default(), &config_args(None, &[]))?;

    assert!(!changed);
    assert_eq!(config, TrackerConfig::default());
    Ok(())
  }

  #[test]
  fn test_apply_changes_rejects_malformed_label() {
    let mut config = TrackerConfig::default();

    let result = apply_changes(&mut config, &ContextArgs::default(), &config_args(None, &["Open"]));

    assert!(result.is_err());
  }
}
