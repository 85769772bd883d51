//! # jrel Core Library
//!
//! Release workflow engine over the Jira gateway: moves issues through their
//! workflow, creates and releases fix versions, and enumerates the issues of
//! a release. Also hosts the configuration, credential, and host resolution
//! helpers the CLI uses to build a [`ReleaseTracker`].

pub mod config;
pub mod context;
pub mod creds;
pub mod error;
pub mod filter;
pub mod issue;
pub mod query;
pub mod release;
pub mod status;
mod tracker;
pub mod transition;
pub mod url;
mod validate;

// Re-export main types
pub use config::{ConfigDirs, TrackerConfig, get_config_dirs};
pub use context::Context;
pub use error::{ReleaseError, Result};
pub use filter::{Category, ProjectFilter};
pub use issue::{Issue, Transition, Version};
pub use query::IssueQuery;
pub use release::ReleaseOutcome;
pub use status::StatusMap;
pub use tracker::ReleaseTracker;
pub use transition::{IllegalTransition, IssueTransition, TransitionOutcome};
