//! Directory user models

use serde::{Deserialize, Serialize};

use crate::client::pagination::Page;

/// Directory user record (only the fields requested by the field mask)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    /// User's primary email address
    pub primary_email: String,
}

/// One page of `users.list`.
///
/// The API omits `users` entirely on an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl From<UsersPage> for Page<String> {
    fn from(page: UsersPage) -> Self {
        Page::new(
            page.users.into_iter().map(|u| u.primary_email).collect(),
            page.next_page_token,
        )
    }
}
