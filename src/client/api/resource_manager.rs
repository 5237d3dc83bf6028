//! Cloud Resource Manager API trait

use async_trait::async_trait;

use crate::client::models::{AccessToken, Project};
use crate::client::pagination::Page;
use crate::error::Result;

/// Project listing operations
#[async_trait]
pub trait ResourceManagerApi: Send + Sync {
    /// Fetch one page of the projects visible to the token's subject.
    ///
    /// No filter is applied: every project the user can see is returned.
    async fn list_projects_page(
        &self,
        token: &AccessToken,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Project>>;
}
