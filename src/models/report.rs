//! (user, project) report records

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Project;

/// One project a user can access.
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
pub struct UserProject {
    /// Primary email of the user
    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "PROJECT NAME")]
    pub project_name: String,

    #[tabled(rename = "PROJECT ID")]
    pub project_id: String,

    #[tabled(rename = "PROJECT NUMBER")]
    pub project_number: String,
}

impl UserProject {
    pub fn new(email: &str, project: Project) -> Self {
        Self {
            email: email.to_string(),
            project_name: project.name,
            project_id: project.project_id,
            project_number: project.project_number,
        }
    }
}

/// One active user from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
pub struct UserRecord {
    #[tabled(rename = "EMAIL")]
    pub email: String,
}

impl From<String> for UserRecord {
    fn from(email: String) -> Self {
        Self { email }
    }
}
