//! # jrel CLI Entry Point
//!
//! The `jrel` command drives the Jira release workflow: validating the
//! connection, listing and transitioning the issues of a fix version, and
//! creating and releasing versions.

use anyhow::Result;
use clap::Parser;
use cli::handle_cli;
use tracing::{Level, debug};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod clients;
mod output;

/// Module whose only default-level output is the rejected-transition report,
/// which the commands print themselves
const TRANSITION_LOG_TARGET: &str = "jrel_core::transition";

fn main() -> Result<()> {
  let cmd = cli::Cli::parse();
  let level = log_level(cmd.verbose);

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(log_filter(EnvFilter::from_default_env(), cmd.verbose))
    .init();

  debug!("Tracing initialized with level: {}", level);

  handle_cli(cmd)
}

fn log_level(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: executed changes
    2 => Level::DEBUG, // -vv: no-ops and skipped issues
    _ => Level::TRACE, // -vvv or more: everything
  }
}

/// Add the `-v` level to `filter`.
///
/// At the default level the transition engine is silenced, so a rejected
/// transition is reported once, by the command.
fn log_filter(filter: EnvFilter, verbose: u8) -> EnvFilter {
  let filter = filter.add_directive(log_level(verbose).into());
  if verbose > 0 {
    return filter;
  }

  match format!("{TRANSITION_LOG_TARGET}=off").parse() {
    Ok(directive) => filter.add_directive(directive),
    Err(_) => filter,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_filter_silences_transition_reports() {
    let filter = log_filter(EnvFilter::new(""), 0).to_string();

    assert!(filter.contains("jrel_core::transition=off"));
    assert!(filter.contains("warn"));
  }

  #[test]
  fn test_verbose_filter_keeps_transition_logs() {
    let filter = log_filter(EnvFilter::new(""), 1).to_string();

    assert!(!filter.contains("jrel_core::transition"));
    assert!(filter.contains("info"));
  }
}
