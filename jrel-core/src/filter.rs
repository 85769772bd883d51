//! # Project Filter
//!
//! The persisted filter names a single project. Older hosts exchange it as an
//! array of category ids, so this module projects it to and from that shape
//! and lists projects as categories.

use jrel_jira::JiraProject;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tracker::ReleaseTracker;

/// Category type names offered to array-shaped hosts
pub const CATEGORY_TYPE_NAMES: [&str; 1] = ["Project"];

/// Single-project filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
  pub project_id: String,
}

impl ProjectFilter {
  pub fn new(project_id: impl Into<String>) -> Self {
    Self {
      project_id: project_id.into(),
    }
  }

  pub fn description(&self) -> String {
    format!("Project ID: {}", self.project_id)
  }
}

/// A project presented as a host category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub id: String,
  pub name: String,
  pub type_name: String,
}

impl From<&JiraProject> for Category {
  fn from(project: &JiraProject) -> Self {
    Self {
      id: project.key.clone(),
      name: project.name.clone(),
      type_name: CATEGORY_TYPE_NAMES[0].to_string(),
    }
  }
}

/// Array-shaped view of a filter
pub fn to_category_ids(filter: Option<&ProjectFilter>) -> Option<Vec<String>> {
  filter.map(|f| vec![f.project_id.clone()])
}

/// Filter from an array of category ids; only the first id is kept.
pub fn from_category_ids(ids: Option<&[String]>) -> Option<ProjectFilter> {
  ids.and_then(|ids| ids.first()).map(|id| ProjectFilter::new(id.clone()))
}

impl ReleaseTracker {
  /// Visible projects as host categories
  pub async fn categories(&self) -> Result<Vec<Category>> {
    let projects = self.projects().await?;
    Ok(projects.iter().map(Category::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::tracker::tests::tracker_for;

  #[test]
  fn test_to_category_ids() {
    let filter = ProjectFilter::new("ABC");
    assert_eq!(to_category_ids(Some(&filter)), Some(vec!["ABC".to_string()]));
    assert_eq!(to_category_ids(None), None);
  }

  #[test]
  fn test_from_category_ids_keeps_first() {
    let ids = vec!["ABC".to_string(), "XYZ".to_string()];
    assert_eq!(from_category_ids(Some(ids.as_slice())), Some(ProjectFilter::new("ABC")));
    assert_eq!(from_category_ids(Some(&[][..])), None);
    assert_eq!(from_category_ids(None), None);
  }

  #[test]
  fn test_description() {
    assert_eq!(ProjectFilter::new("ABC").description(), "Project ID: ABC");
  }

  #[tokio::test]
  async fn test_categories() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let tracker = tracker_for(&mock_server);
    Mock::given(method("GET"))
      .and(path("/rest/api/2/project"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          { "id": "1", "key": "ABC", "name": "Alphabet" }
      ])))
      .mount(&mock_server)
      .await;

    let categories = tracker.categories().await?;
    assert_eq!(
      categories,
      vec![Category {
        id: "ABC".to_string(),
        name: "Alphabet".to_string(),
        type_name: "Project".to_string(),
      }]
    );
    Ok(())
  }
}
