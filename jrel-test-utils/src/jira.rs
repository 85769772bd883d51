//! Jira REST payloads for `wiremock` responses
//!
//! The builders return the smallest documents the jrel gateway accepts, so
//! tests only spell out the fields they care about.

use serde_json::{Value, json};

/// An issue document with the given key and status
pub fn issue_json(key: &str, status: &str) -> Value {
  json!({
      "id": format!("1{}", key.rsplit('-').next().unwrap_or("0")),
      "key": key,
      "fields": {
          "summary": format!("Summary of {key}"),
          "description": null,
          "status": { "name": status },
          "issuetype": { "id": "1", "name": "Bug" },
          "resolution": null,
          "created": "2024-01-15T10:30:00.000+0000",
          "reporter": { "name": "jdoe", "displayName": "Jane Doe" }
      }
  })
}

/// An issue document that carries a resolution
pub fn resolved_issue_json(key: &str, status: &str, resolution: &str) -> Value {
  let mut issue = issue_json(key, status);
  issue["fields"]["resolution"] = json!({ "name": resolution });
  issue
}

/// A search response wrapping the given issue documents
pub fn search_json(issues: Vec<Value>) -> Value {
  json!({
      "startAt": 0,
      "maxResults": 1000,
      "total": issues.len(),
      "issues": issues
  })
}

/// A transitions response; each entry is `(transition id, target status)`
pub fn transitions_json(transitions: &[(&str, &str)]) -> Value {
  let transitions: Vec<Value> = transitions
    .iter()
    .map(|(id, target)| {
      json!({
          "id": id,
          "name": target,
          "to": { "name": target }
      })
    })
    .collect();
  json!({ "transitions": transitions })
}

/// A transitions response whose transition names differ from their target
/// statuses; each entry is `(transition id, transition name, target status)`
pub fn named_transitions_json(transitions: &[(&str, &str, &str)]) -> Value {
  let transitions: Vec<Value> = transitions
    .iter()
    .map(|(id, name, target)| {
      json!({
          "id": id,
          "name": name,
          "to": { "name": target }
      })
    })
    .collect();
  json!({ "transitions": transitions })
}

/// A single version document
pub fn version_json(id: &str, name: &str, released: bool) -> Value {
  json!({
      "id": id,
      "name": name,
      "released": released,
      "archived": false
  })
}

/// A version list; each entry is `(id, name, released)`
pub fn versions_json(versions: &[(&str, &str, bool)]) -> Value {
  Value::Array(
    versions
      .iter()
      .map(|(id, name, released)| version_json(id, name, *released))
      .collect(),
  )
}

/// A `mypermissions` response; each entry is `(key, granted)`
pub fn permissions_json(grants: &[(&str, bool)]) -> Value {
  let permissions: serde_json::Map<String, Value> = grants
    .iter()
    .map(|(key, granted)| {
      (
        key.to_string(),
        json!({
            "key": key,
            "name": key,
            "havePermission": granted
        }),
      )
    })
    .collect();
  json!({ "permissions": permissions })
}
