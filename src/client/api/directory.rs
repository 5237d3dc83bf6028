//! Admin SDK Directory API trait

use async_trait::async_trait;

use crate::client::models::AccessToken;
use crate::client::pagination::{MAX_PAGE_SIZE, Page};
use crate::error::Result;

/// Filter applied to every `users.list` request: active accounts only.
pub const ACTIVE_USERS_QUERY: &str = "isSuspended=false";

/// Field mask limiting the response to what fadup reads.
///
/// `nextPageToken` must stay in the mask or the cursor is stripped from
/// every response.
pub const USERS_FIELD_MASK: &str = "nextPageToken,users/primaryEmail";

/// Parameters for listing the users of one Workspace customer
#[derive(Debug, Clone)]
pub struct UserListParams {
    /// Immutable Workspace customer ID (e.g. `C0abc123`)
    pub customer_id: String,

    /// Users per page (1..=500)
    pub page_size: u32,
}

impl UserListParams {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Query string pairs for one request; `pageToken` goes last.
    pub fn to_query_params(&self, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("customer", self.customer_id.clone()),
            ("query", ACTIVE_USERS_QUERY.to_string()),
            ("fields", USERS_FIELD_MASK.to_string()),
            ("maxResults", self.page_size.to_string()),
        ];

        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        params
    }
}

/// User listing operations
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch one page of non-suspended users' primary emails
    async fn list_users_page(
        &self,
        token: &AccessToken,
        params: &UserListParams,
        page_token: Option<&str>,
    ) -> Result<Page<String>>;
}
