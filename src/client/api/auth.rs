//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AccessToken, Scope};
use crate::error::Result;

/// Token issuance through domain-wide delegation
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Obtain an access token impersonating `subject` for `scope`.
    ///
    /// Every call performs a fresh token exchange; callers own the token's
    /// lifetime (see [`Session`](crate::client::Session)).
    async fn authorize(&self, subject: &str, scope: Scope) -> Result<AccessToken>;
}
