//! Jira host resolution.
//!
//! The host comes from `$JIRA_HOST` or the config file and may be written
//! without a scheme; it is normalized to a base URL without a trailing slash.

use anyhow::Result;
use url::{Position, Url};

/// Environment variable storing the Jira host configuration.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Resolve the Jira base URL, preferring `$JIRA_HOST` over the configured host.
pub fn resolve_jira_base_url(configured: Option<&str>) -> Result<String> {
  match std::env::var(ENV_JIRA_HOST) {
    Ok(host) if !host.trim().is_empty() => ensure_url_scheme(&host),
    _ => match configured {
      Some(host) => ensure_url_scheme(host),
      None => Err(anyhow::anyhow!(
        "Jira host not configured. Set '{ENV_JIRA_HOST}' or 'host' in the jrel config file."
      )),
    },
  }
}

/// Normalize a URL by removing the trailing slash when the path is just "/".
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);

  let path = url.path().trim_end_matches('/');
  result.push_str(path);

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  Url::parse(&format!("https://{input}"))
    .map_err(|_| anyhow::anyhow!("Failed to parse URL: '{input}'. Ensure it has a valid scheme."))
}

/// Ensure a URL has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Also handles
/// malformed schemes like "http:/example.com" (missing slash).
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http:", "https:"] {
    if lowered.starts_with(scheme) && !lowered.starts_with(&format!("{scheme}//")) {
      let remainder = &trimmed[scheme.len()..];
      return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}
