//! # Jira API Client
//!
//! Provides Jira REST API integration for the release workflow: issue search,
//! workflow transitions, project versions, comments, issue creation, and the
//! permission check used to validate a connection.

mod client;
pub mod consts;
mod endpoints;
pub mod jql;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{
  JiraAuth, JiraIssue, JiraIssueFields, JiraIssueStatus, JiraIssueType, JiraPermission, JiraProject, JiraTransition,
  JiraUser, JiraVersion,
};
