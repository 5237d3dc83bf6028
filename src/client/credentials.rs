//! Service account key material and JWT bearer assertions
//!
//! Domain-wide delegation works by signing a JWT with the service account's
//! private key, naming the impersonated user in `sub`, and exchanging it at
//! the token endpoint for a short-lived access token.

use std::path::Path;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::models::Scope;
use crate::error::{AuthError, Result};

/// Default Google OAuth token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for each assertion (the maximum Google accepts)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Service account JSON key file as downloaded from the Cloud console
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account email, used as the assertion issuer
    pub client_email: String,

    /// PEM-encoded RSA private key
    pub private_key: String,

    /// Key ID, sent as the JWT `kid` header when present
    #[serde(default)]
    pub private_key_id: Option<String>,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Load and parse a key file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let key_error = |reason: String| AuthError::KeyFile {
            path: path.to_path_buf(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| key_error(e.to_string()))?;
        let key = serde_json::from_str(&contents).map_err(|e| key_error(e.to_string()))?;
        Ok(key)
    }

    /// Parse key file contents that did not come from a file
    #[cfg(test)]
    pub fn from_json(contents: &str) -> Result<Self> {
        let key = serde_json::from_str(contents).map_err(|e| AuthError::KeyFile {
            path: "<inline>".into(),
            reason: e.to_string(),
        })?;
        Ok(key)
    }

    /// Parse the PEM private key into a signing key
    pub fn encoding_key(&self) -> Result<EncodingKey> {
        EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()).into())
    }
}

/// Claims of a JWT bearer assertion for one impersonated subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, subject: &str, scope: Scope, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();
        Self {
            iss: key.client_email.clone(),
            sub: subject.to_string(),
            scope: scope.as_str().to_string(),
            aud: key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// Sign an RS256 assertion impersonating `subject`
pub fn sign_assertion(
    key: &ServiceAccountKey,
    encoding_key: &EncodingKey,
    subject: &str,
    scope: Scope,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let claims = AssertionClaims::new(key, subject, scope, now);
    jsonwebtoken::encode(&header, &claims, encoding_key)
        .map_err(|e| AuthError::Signing(e.to_string()).into())
}
