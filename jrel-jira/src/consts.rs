//! Constants for the jrel-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jrel/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Upper bound of issues requested from a single search call
pub const MAX_SEARCH_RESULTS: u32 = 1000;

/// Permission required to see any issues at all
pub const BROWSE_PROJECTS_PERMISSION: &str = "BROWSE_PROJECTS";
