//! # Jira API Endpoints
//!
//! Organized endpoint implementations for the Jira API resource types the
//! release workflow touches: issues, transitions, versions, projects, and
//! permissions.

pub mod issues;
pub mod permissions;
pub mod projects;
pub mod transitions;
pub mod versions;
