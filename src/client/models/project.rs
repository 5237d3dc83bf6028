//! Cloud Resource Manager project models

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::pagination::Page;

/// Cloud Platform project visible to the impersonated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Display name (may be unset)
    #[serde(default)]
    pub name: String,

    /// Project ID
    pub project_id: String,

    /// Project number (int64, sent as a decimal string)
    #[serde(deserialize_with = "string_or_number")]
    pub project_number: String,
}

/// One page of `projects.list`.
///
/// Users without projects get a response with no `projects` key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsPage {
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl From<ProjectsPage> for Page<Project> {
    fn from(page: ProjectsPage) -> Self {
        Page::new(page.projects, page.next_page_token)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
