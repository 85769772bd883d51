//! # Issue Enumeration
//!
//! Two ways to list the issues of a context:
//!
//! - [`ReleaseTracker::enumerate_issues`] resolves the fix version first and
//!   lists the issues scheduled for it. A missing version yields no issues.
//! - [`ReleaseTracker::search_issues`] runs a structured JQL query derived from
//!   the context, see [`IssueQuery`].
//!
//! Both return the issues of a single response.

use jrel_jira::jql;
use tracing::debug;

use crate::context::Context;
use crate::error::Result;
use crate::issue::{Issue, Transition};
use crate::tracker::ReleaseTracker;

/// Structured issue filter rendered to JQL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
  project: Option<String>,
  fix_version: Option<String>,
  statuses: Vec<String>,
  issue_types: Vec<String>,
  clause: Option<String>,
  order_by: Option<String>,
}

impl IssueQuery {
  pub fn new() -> Self {
    Self::default()
  }

  /// Query for the project and fix version of a context; empty fields are
  /// left out.
  pub fn for_context(context: &Context) -> Self {
    let mut query = Self::new();
    if !context.project().is_empty() {
      query = query.project(context.project());
    }
    if !context.fix_for_version().is_empty() {
      query = query.fix_version(context.fix_for_version());
    }
    query
  }

  pub fn project(mut self, key: impl Into<String>) -> Self {
    self.project = Some(key.into());
    self
  }

  pub fn fix_version(mut self, name: impl Into<String>) -> Self {
    self.fix_version = Some(name.into());
    self
  }

  /// Restrict to issues in any of the given statuses
  pub fn status(mut self, status: impl Into<String>) -> Self {
    self.statuses.push(status.into());
    self
  }

  /// Restrict to issues of any of the given types
  pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
    self.issue_types.push(issue_type.into());
    self
  }

  /// Raw JQL condition, combined with the other filters using `AND`
  pub fn clause(mut self, clause: impl Into<String>) -> Self {
    self.clause = Some(clause.into());
    self
  }

  /// Raw JQL ordering, e.g. `key ASC`
  pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
    self.order_by = Some(order_by.into());
    self
  }

  pub fn to_jql(&self) -> String {
    let mut conditions = Vec::new();
    if let Some(project) = &self.project {
      conditions.push(format!("project = {}", jql::quote(project)));
    }
    if let Some(fix_version) = &self.fix_version {
      conditions.push(format!("fixVersion = {}", jql::quote(fix_version)));
    }
    if !self.statuses.is_empty() {
      conditions.push(format!("status in ({})", quote_all(&self.statuses)));
    }
    if !self.issue_types.is_empty() {
      conditions.push(format!("issuetype in ({})", quote_all(&self.issue_types)));
    }
    if let Some(clause) = self.clause.as_deref().filter(|c| !c.trim().is_empty()) {
      conditions.push(format!("({clause})"));
    }

    let mut rendered = conditions.join(" AND ");
    if let Some(order_by) = &self.order_by {
      if !rendered.is_empty() {
        rendered.push(' ');
      }
      rendered.push_str("ORDER BY ");
      rendered.push_str(order_by);
    }
    rendered
  }
}

fn quote_all(values: &[String]) -> String {
  values.iter().map(|v| jql::quote(v)).collect::<Vec<_>>().join(", ")
}

impl ReleaseTracker {
  /// Issues scheduled for the context's fix version.
  ///
  /// Returns no issues, rather than an error, when the version does not exist.
  pub async fn enumerate_issues(&self, context: &Context) -> Result<Vec<Issue>> {
    let Some(version) = self.try_get_version(context).await? else {
      debug!(
        "Version {} does not exist in {}; no issues to enumerate",
        context.fix_for_version(),
        context.project()
      );
      return Ok(Vec::new());
    };

    let issues = self.client.get_issues(context.project(), version.name()).await?;
    Ok(issues.iter().map(|issue| self.to_issue(issue)).collect())
  }

  /// Issues matching the structured query derived from the context
  pub async fn search_issues(&self, context: &Context) -> Result<Vec<Issue>> {
    self.search_issues_matching(&IssueQuery::for_context(context)).await
  }

  /// Issues matching an explicit query
  pub async fn search_issues_matching(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
    let jql = query.to_jql();
    debug!("Searching issues with JQL: {jql}");
    let issues = self.client.search_issues(&jql).await?;
    Ok(issues.iter().map(|issue| self.to_issue(issue)).collect())
  }

  /// Transitions of the last issue of the context's enumeration.
  ///
  /// This samples a single issue as a stand-in for the workflow's transitions;
  /// issues of other types or in other statuses may allow different ones.
  pub async fn get_transitions(&self, context: &Context) -> Result<Vec<Transition>> {
    let Some(issue) = self.enumerate_issues(context).await?.pop() else {
      return Ok(Vec::new());
    };

    self.issue_transitions(issue.id()).await
  }
}

#[cfg(test)]
mod tests {
  use jrel_test_utils::jira::{issue_json, search_json, transitions_json, versions_json};
  use wiremock::matchers::{body_partial_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::error::ReleaseError;
  use crate::tracker::tests::tracker_for;

  #[test]
  fn test_query_for_context() {
    let query = IssueQuery::for_context(&Context::new("ABC", "1.0", "Done"));
    assert_eq!(query.to_jql(), "project = \"ABC\" AND fixVersion = \"1.0\"");
  }

  #[test]
  fn test_query_with_all_filters() {
    let query = IssueQuery::new()
      .project("ABC")
      .status("Open")
      .status("In Progress")
      .issue_type("Bug")
      .clause("labels = release-blocker OR priority = Highest")
      .order_by("key ASC");

    assert_eq!(
      query.to_jql(),
      "project = \"ABC\" AND status in (\"Open\", \"In Progress\") AND issuetype in (\"Bug\") \
       AND (labels = release-blocker OR priority = Highest) ORDER BY key ASC"
    );
  }

  #[test]
  fn test_query_skips_empty_context_fields() {
    let query = IssueQuery::for_context(&Context::new("ABC", "", "Done")).order_by("created DESC");
    assert_eq!(query.to_jql(), "project = \"ABC\" ORDER BY created DESC");
  }

  #[tokio::test]
  async fn test_enumerate_issues_for_existing_version() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/ABC/versions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(versions_json(&[("100", "1.0", false)])))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "project = \"ABC\" AND fixVersion = \"1.0\""))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![
        issue_json("ABC-1", "Open"),
        issue_json("ABC-2", "Done"),
      ])))
      .mount(&mock_server)
      .await;

    let issues = tracker.enumerate_issues(&Context::new("ABC", "1.0", "Done")).await?;

    let ids: Vec<_> = issues.iter().map(Issue::id).collect();
    assert_eq!(ids, vec!["ABC-1", "ABC-2"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_enumerate_issues_missing_version_is_empty() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/ABC/versions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(versions_json(&[("100", "0.9", true)])))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![])))
      .expect(0)
      .mount(&mock_server)
      .await;

    let issues = tracker.enumerate_issues(&Context::new("ABC", "1.0", "Done")).await?;

    assert!(issues.is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn test_enumerate_issues_requires_fix_version() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    let result = tracker.enumerate_issues(&Context::new("ABC", "", "Done")).await;

    assert!(matches!(result, Err(ReleaseError::InvalidArgument(_))));
    Ok(())
  }

  #[tokio::test]
  async fn test_search_issues_posts_context_query() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/api/2/search"))
      .and(body_partial_json(serde_json::json!({
          "jql": "project = \"ABC\" AND fixVersion = \"1.0\""
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![issue_json("ABC-9", "Open")])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = tracker.search_issues(&Context::new("ABC", "1.0", "Done")).await?;

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id(), "ABC-9");
    Ok(())
  }

  #[tokio::test]
  async fn test_get_transitions_samples_last_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/ABC/versions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(versions_json(&[("100", "1.0", false)])))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![
        issue_json("ABC-1", "Open"),
        issue_json("ABC-2", "In Progress"),
      ])))
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/ABC-2/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_json(&[("31", "Done"), ("41", "Blocked")])))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/ABC-1/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_json(&[])))
      .expect(0)
      .mount(&mock_server)
      .await;

    let transitions = tracker.get_transitions(&Context::new("ABC", "1.0", "Done")).await?;

    let names: Vec<_> = transitions.iter().map(Transition::name).collect();
    assert_eq!(names, vec!["Done", "Blocked"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_get_transitions_without_issues_is_empty() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project/ABC/versions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(versions_json(&[])))
      .mount(&mock_server)
      .await;

    let transitions = tracker.get_transitions(&Context::new("ABC", "1.0", "Done")).await?;

    assert!(transitions.is_empty());
    Ok(())
  }
}
