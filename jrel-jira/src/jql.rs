//! Helpers for building JQL clauses.

/// Quote a value for use inside a JQL clause.
///
/// Backslashes and double quotes are escaped so that version names such as
/// `1.0 "beta"` survive the round trip.
pub fn quote(value: &str) -> String {
  let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
  format!("\"{escaped}\"")
}

/// JQL selecting the issues of a project that carry a fix version
pub fn project_fix_version(project_key: &str, version_name: &str) -> String {
  format!(
    "project = {} AND fixVersion = {}",
    quote(project_key),
    quote(version_name)
  )
}
