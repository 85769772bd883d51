//! # Command Line Interface
//!
//! Defines the `jrel` command tree and dispatches to the handlers in the
//! submodules.

mod config;
mod issues;
mod project;
mod release;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use jrel_core::{Context, TrackerConfig};

use crate::output::ColorMode;

/// Top-level CLI command for jrel
#[derive(Parser)]
#[command(name = "jrel")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Drive a Jira release workflow from the command line")]
#[command(
  long_about = "jrel manages the release workflow of a Jira project.\n\n\
        It lists the issues scheduled for a fix version, moves them through the\n\
        project's workflow, and creates and releases the version itself."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show executed changes\n\
             -vv: Show skipped issues and no-op transitions\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  #[command(flatten)]
  pub context: ContextArgs,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Options that scope an operation to a project release
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
  /// Project key, overriding the configured project filter
  #[arg(long, short = 'p', global = true, value_name = "KEY")]
  pub project: Option<String>,

  /// Fix version the operation applies to
  #[arg(long = "fix-version", short = 'f', global = true, value_name = "VERSION")]
  pub fix_version: Option<String>,

  /// Workflow status that closes an issue, overriding the configured one
  #[arg(long = "closed-state", global = true, value_name = "STATUS")]
  pub closed_state: Option<String>,
}

impl ContextArgs {
  /// Merge these options over the configured values
  pub fn resolve(&self, config: &TrackerConfig) -> Context {
    config.context(
      self.fix_version.as_deref().unwrap_or_default(),
      self.project.as_deref(),
      self.closed_state.as_deref(),
    )
  }
}

/// Subcommands for jrel
#[derive(Subcommand)]
pub enum Commands {
  /// Check the Jira connection and the account's permissions
  #[command(long_about = "Checks that Jira is reachable with the configured credentials and that the\n\
            account is allowed to browse projects. Fails otherwise.")]
  Validate,

  /// Show or change the jrel configuration
  #[command(long_about = "Shows or updates the jrel configuration file.\n\n\
            The file holds the Jira host, the project filter, the closed state,\n\
            and the status display labels.")]
  Config(config::ConfigArgs),

  /// List the issues of the fix version
  #[command(long_about = "Lists the issues scheduled for the fix version.\n\n\
            Without filters the fix version must exist. With --query, --status,\n\
            or --type the issues are searched with a JQL query instead.")]
  #[command(alias = "ls")]
  Issues(issues::IssuesArgs),

  /// List workflow transitions
  #[command(long_about = "Lists the transitions available to an issue. Without an issue, the\n\
            last issue of the fix version is sampled.")]
  Transitions(issues::TransitionsArgs),

  /// Move one issue to a status
  Transition(issues::TransitionArgs),

  /// Move every issue of the fix version to a status
  #[command(name = "transition-all")]
  TransitionAll(issues::TransitionAllArgs),

  /// Move an issue to the closed state
  Close(issues::CloseArgs),

  /// Comment on an issue
  Comment(issues::CommentArgs),

  /// Create an issue scheduled for the fix version
  #[command(name = "create-issue")]
  CreateIssue(issues::CreateIssueArgs),

  /// Create the fix version unless it exists
  #[command(name = "create-release")]
  CreateRelease,

  /// Mark the fix version released
  #[command(name = "deploy-release")]
  DeployRelease,

  /// List the versions of the project
  Versions,

  /// List the projects visible to the account
  Projects,

  /// List the issue types of the project
  #[command(name = "issue-types")]
  IssueTypes,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  // Set global color override based on --colors argument
  match cli.colors {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  let context = &cli.context;
  match cli.command {
    Commands::Validate => project::handle_validate_command(),
    Commands::Config(args) => config::handle_config_command(context, args),
    Commands::Issues(args) => issues::handle_issues_command(context, args),
    Commands::Transitions(args) => issues::handle_transitions_command(context, args),
    Commands::Transition(args) => issues::handle_transition_command(args),
    Commands::TransitionAll(args) => issues::handle_transition_all_command(context, args),
    Commands::Close(args) => issues::handle_close_command(context, args),
    Commands::Comment(args) => issues::handle_comment_command(args),
    Commands::CreateIssue(args) => issues::handle_create_issue_command(context, args),
    Commands::CreateRelease => release::handle_create_release_command(context),
    Commands::DeployRelease => release::handle_deploy_release_command(context),
    Commands::Versions => release::handle_versions_command(context),
    Commands::Projects => project::handle_projects_command(),
    Commands::IssueTypes => project::handle_issue_types_command(context),
  }
}

/// Load the configuration file, falling back to defaults when absent
pub(crate) fn load_config() -> Result<TrackerConfig> {
  jrel_core::get_config_dirs()?.load_config()
}
