//! Impersonated API sessions
//!
//! A session is the credential context for one subject and scope. It is
//! created per listing (once for the super admin, once per user) and dropped
//! when the listing ends, so tokens are never shared between users.

use log::debug;

use super::api::AuthApi;
use super::models::{AccessToken, Scope};
use crate::error::Result;

pub struct Session<'a, C: AuthApi + ?Sized> {
    client: &'a C,
    subject: String,
    scope: Scope,
    token: Option<AccessToken>,
}

impl<'a, C: AuthApi + ?Sized> Session<'a, C> {
    pub fn new(client: &'a C, subject: impl Into<String>, scope: Scope) -> Self {
        Self {
            client,
            subject: subject.into(),
            scope,
            token: None,
        }
    }

    /// Current access token, authorizing on first use and again when the
    /// token is within five minutes of expiry.
    pub async fn access_token(&mut self) -> Result<&AccessToken> {
        let token = match self.token.take() {
            Some(token) if !token.is_expired() => token,
            stale => {
                if stale.is_some() {
                    debug!("Refreshing expired token for {}", self.subject);
                } else {
                    debug!("Authorizing as {} for {}", self.subject, self.scope);
                }
                self.client.authorize(&self.subject, self.scope).await?
            }
        };

        Ok(self.token.insert(token))
    }
}
