use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
  #[allow(dead_code)]
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueFields {
  pub summary: String,
  pub description: Option<String>,
  pub status: JiraIssueStatus,
  #[serde(rename = "issuetype")]
  pub issue_type: Option<JiraIssueType>,
  pub resolution: Option<JiraResolution>,
  /// Creation timestamp as sent by Jira, e.g. `2024-01-15T10:30:00.000+0000`
  pub created: Option<String>,
  pub reporter: Option<JiraUser>,
  #[serde(rename = "fixVersions", default)]
  pub fix_versions: Vec<JiraVersion>,
}

/// Represents a Jira issue status
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueStatus {
  #[allow(dead_code)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira issue type
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueType {
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub subtask: bool,
}

/// Represents the resolution of a resolved issue
#[derive(Debug, Clone, Deserialize)]
pub struct JiraResolution {
  pub name: String,
}

/// Represents a Jira user reference
#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
  pub name: Option<String>,
  #[serde(rename = "displayName")]
  pub display_name: Option<String>,
  #[serde(rename = "emailAddress")]
  pub email_address: Option<String>,
}

impl JiraUser {
  /// Best human-readable identifier for the user
  pub fn label(&self) -> Option<&str> {
    self
      .display_name
      .as_deref()
      .or(self.name.as_deref())
      .or(self.email_address.as_deref())
  }
}

/// Represents a Jira transition
#[derive(Debug, Clone, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
  /// Status the issue lands in after the transition
  pub to: Option<JiraIssueStatus>,
}

impl JiraTransition {
  /// Name of the status this transition leads to.
  ///
  /// Older Jira servers omit `to`; the transition name is used then.
  pub fn target_status(&self) -> &str {
    self.to.as_ref().map_or(self.name.as_str(), |status| status.name.as_str())
  }
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<JiraTransition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

impl TransitionRequest {
  pub fn new(transition_id: impl Into<String>) -> Self {
    Self {
      transition: TransitionId { id: transition_id.into() },
    }
  }
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Represents a project version (a release)
#[derive(Debug, Clone, Deserialize)]
pub struct JiraVersion {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub released: bool,
  #[serde(default)]
  pub archived: bool,
  #[serde(rename = "releaseDate")]
  pub release_date: Option<String>,
}

/// Payload for creating a version
#[derive(Debug, Serialize)]
pub struct CreateVersionRequest {
  pub name: String,
  pub project: String,
  pub released: bool,
}

/// Payload for marking a version released
#[derive(Debug, Serialize)]
pub struct ReleaseVersionRequest {
  pub released: bool,
  #[serde(rename = "releaseDate", skip_serializing_if = "Option::is_none")]
  pub release_date: Option<String>,
}

/// Payload for the JQL search endpoint
#[derive(Debug, Serialize)]
pub struct SearchRequest {
  pub jql: String,
  #[serde(rename = "startAt")]
  pub start_at: u32,
  #[serde(rename = "maxResults")]
  pub max_results: u32,
}

/// Represents a page of search results
#[derive(Debug, Deserialize)]
pub struct JiraSearchResults {
  #[serde(default)]
  pub total: u32,
  pub issues: Vec<JiraIssue>,
}

impl JiraSearchResults {
  /// Whether the server matched more issues than it returned
  pub fn is_truncated(&self) -> bool {
    usize::try_from(self.total).is_ok_and(|total| total > self.issues.len())
  }
}

/// Payload for adding a comment
#[derive(Debug, Serialize)]
pub struct CommentRequest {
  pub body: String,
}

/// Payload for creating an issue
#[derive(Debug, Serialize)]
pub struct CreateIssueRequest {
  pub fields: CreateIssueFields,
}

/// Fields of a newly created issue
#[derive(Debug, Serialize)]
pub struct CreateIssueFields {
  pub project: KeyRef,
  pub summary: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "issuetype")]
  pub issue_type: NameRef,
  #[serde(rename = "fixVersions", skip_serializing_if = "Vec::is_empty")]
  pub fix_versions: Vec<NameRef>,
}

/// Reference to an entity by key
#[derive(Debug, Serialize)]
pub struct KeyRef {
  pub key: String,
}

/// Reference to an entity by name
#[derive(Debug, Serialize)]
pub struct NameRef {
  pub name: String,
}

/// Response returned when an issue is created
#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
  pub id: String,
  pub key: String,
}

/// Represents a single permission grant of the current user
#[derive(Debug, Clone, Deserialize)]
pub struct JiraPermission {
  pub key: String,
  #[serde(rename = "havePermission")]
  pub has_permission: bool,
}

/// Represents the response of the `mypermissions` endpoint
#[derive(Debug, Deserialize)]
pub struct JiraPermissions {
  pub permissions: HashMap<String, JiraPermission>,
}

/// Represents a Jira project
#[derive(Debug, Clone, Deserialize)]
pub struct JiraProject {
  pub id: String,
  pub key: String,
  pub name: String,
}

/// Represents a Jira project with its issue types
#[derive(Debug, Deserialize)]
pub struct JiraProjectDetail {
  pub id: String,
  pub key: String,
  pub name: String,
  #[serde(rename = "issueTypes", default)]
  pub issue_types: Vec<JiraIssueType>,
}

/// Payload for creating a project
#[derive(Debug, Serialize)]
pub struct CreateProjectRequest {
  pub key: String,
  pub name: String,
  #[serde(rename = "projectTypeKey")]
  pub project_type_key: String,
  pub lead: String,
}

/// Error body returned by Jira for rejected requests
#[derive(Debug, Default, Deserialize)]
pub struct JiraErrorResponse {
  #[serde(rename = "errorMessages", default)]
  pub error_messages: Vec<String>,
  #[serde(default)]
  pub errors: HashMap<String, String>,
}

impl JiraErrorResponse {
  /// Flatten all messages into a single line
  pub fn summary(&self) -> String {
    let mut messages = self.error_messages.clone();
    let mut fields: Vec<_> = self.errors.iter().collect();
    fields.sort();
    messages.extend(fields.into_iter().map(|(field, message)| format!("{field}: {message}")));
    messages.join("; ")
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_issue_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "summary": "Test issue",
            "description": "This is a test issue",
            "status": {
                "name": "In Progress"
            },
            "issuetype": { "id": "1", "name": "Bug" },
            "resolution": null,
            "created": "2024-01-15T10:30:00.000+0000",
            "reporter": { "name": "jdoe", "displayName": "Jane Doe" },
            "fixVersions": [{ "id": "100", "name": "1.0", "released": false }]
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.key, "PROJ-123");
    assert_eq!(issue.fields.summary, "Test issue");
    assert_eq!(issue.fields.status.name, "In Progress");
    assert_eq!(issue.fields.issue_type.unwrap().name, "Bug");
    assert!(issue.fields.resolution.is_none());
    assert_eq!(issue.fields.reporter.unwrap().label(), Some("Jane Doe"));
    assert_eq!(issue.fields.fix_versions[0].name, "1.0");
  }

  #[test]
  fn test_minimal_issue_deserialization() {
    let json = json!({
        "id": "10001",
        "key": "PROJ-124",
        "fields": {
            "summary": "Bare issue",
            "status": { "name": "Open" }
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();

    assert!(issue.fields.description.is_none());
    assert!(issue.fields.issue_type.is_none());
    assert!(issue.fields.fix_versions.is_empty());
  }

  #[test]
  fn test_transition_target_status() {
    let json = json!({
        "transitions": [
            { "id": "11", "name": "Finish", "to": { "id": "3", "name": "Done" } },
            { "id": "21", "name": "Blocked" }
        ]
    });

    let transitions: JiraTransitions = serde_json::from_value(json).unwrap();

    assert_eq!(transitions.transitions[0].target_status(), "Done");
    assert_eq!(transitions.transitions[1].target_status(), "Blocked");
  }

  #[test]
  fn test_jira_transition_request_serialization() {
    let request = TransitionRequest::new("21");

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
      json,
      json!({
          "transition": {
              "id": "21"
          }
      })
    );
  }

  #[test]
  fn test_create_issue_request_omits_empty_fix_versions() {
    let request = CreateIssueRequest {
      fields: CreateIssueFields {
        project: KeyRef { key: "ABC".to_string() },
        summary: "Title".to_string(),
        description: None,
        issue_type: NameRef { name: "Task".to_string() },
        fix_versions: Vec::new(),
      },
    };

    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
      json,
      json!({
          "fields": {
              "project": { "key": "ABC" },
              "summary": "Title",
              "issuetype": { "name": "Task" }
          }
      })
    );
  }

  #[test]
  fn test_permissions_deserialization() {
    let json = json!({
        "permissions": {
            "BROWSE_PROJECTS": {
                "id": "10",
                "key": "BROWSE_PROJECTS",
                "name": "Browse Projects",
                "havePermission": true
            }
        }
    });

    let permissions: JiraPermissions = serde_json::from_value(json).unwrap();

    assert!(permissions.permissions["BROWSE_PROJECTS"].has_permission);
  }

  #[test]
  fn test_error_response_summary() {
    let json = json!({
        "errorMessages": ["Version name is taken"],
        "errors": { "name": "A version with this name already exists" }
    });

    let error: JiraErrorResponse = serde_json::from_value(json).unwrap();

    assert_eq!(
      error.summary(),
      "Version name is taken; name: A version with this name already exists"
    );
  }

  #[test]
  fn test_search_results_truncation() {
    let complete: JiraSearchResults = serde_json::from_value(json!({ "total": 0, "issues": [] })).unwrap();
    let partial: JiraSearchResults = serde_json::from_value(json!({ "total": 250, "issues": [] })).unwrap();

    assert!(!complete.is_truncated());
    assert!(partial.is_truncated());
  }
}
