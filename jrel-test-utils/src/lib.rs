//! Test utilities shared across the jrel workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - Throwaway home directories with a `.netrc` ([`NetrcGuard`])
//! - Jira REST payload builders for mock servers ([`jira`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod jira;
pub mod netrc;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use netrc::NetrcGuard;
