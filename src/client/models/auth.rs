//! Authentication models

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// OAuth scopes requested through domain-wide delegation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Admin SDK Directory API, user listing (impersonating a super admin)
    DirectoryUser,
    /// Cloud Resource Manager (impersonating each user)
    CloudPlatform,
}

impl Scope {
    /// Full scope URL as granted in the Admin Console
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::DirectoryUser => "https://www.googleapis.com/auth/admin.directory.user",
            Scope::CloudPlatform => "https://www.googleapis.com/auth/cloud-platform",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bearer token issued for one impersonated subject and scope.
#[derive(Clone)]
pub struct AccessToken {
    /// The bearer token string
    pub token: String,

    /// Email of the impersonated user
    pub subject: String,

    /// Scope the token was issued for
    pub scope: Scope,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Check if the token is expired or will expire soon (within 5 minutes)
    pub fn is_expired(&self) -> bool {
        let buffer = Duration::minutes(5);
        self.expires_at - buffer < Utc::now()
    }
}

// Keep bearer tokens out of debug logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("subject", &self.subject)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Successful response from the OAuth token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime in seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// Error body from the OAuth token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,

    #[serde(default)]
    pub error_description: Option<String>,
}

impl fmt::Display for TokenErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{} ({})", self.error, desc),
            None => f.write_str(&self.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_expiring_in(delta: Duration) -> AccessToken {
        AccessToken {
            token: "ya29.secret".to_string(),
            subject: "a@x.com".to_string(),
            scope: Scope::CloudPlatform,
            expires_at: Utc::now() + delta,
        }
    }

    #[test]
    fn test_scope_urls() {
        assert_eq!(
            Scope::DirectoryUser.as_str(),
            "https://www.googleapis.com/auth/admin.directory.user"
        );
        assert_eq!(
            Scope::CloudPlatform.to_string(),
            "https://www.googleapis.com/auth/cloud-platform"
        );
    }

    #[test]
    fn test_token_expiry() {
        assert!(token_expiring_in(Duration::hours(-1)).is_expired());
        assert!(token_expiring_in(Duration::minutes(2)).is_expired());
        assert!(!token_expiring_in(Duration::hours(1)).is_expired());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", token_expiring_in(Duration::hours(1)));
        assert!(!debug.contains("ya29.secret"));
        assert!(debug.contains("a@x.com"));
    }

    #[test]
    fn test_token_response_defaults_expiry() {
        let resp: TokenResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.expires_in, 3600);
    }

    #[test]
    fn test_token_error_display() {
        let err: TokenErrorResponse = serde_json::from_str(
            r#"{"error": "unauthorized_client", "error_description": "Client is unauthorized"}"#,
        )
        .unwrap();
        assert_eq!(
            err.to_string(),
            "unauthorized_client (Client is unauthorized)"
        );
    }
}
