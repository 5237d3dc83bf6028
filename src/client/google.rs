//! Google API client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::EncodingKey;
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, DirectoryApi, ResourceManagerApi, UserListParams};
use super::credentials::{ServiceAccountKey, sign_assertion};
use super::models::{
    AccessToken, Project, ProjectsPage, Scope, TokenErrorResponse, TokenResponse, UsersPage,
};
use super::pagination::Page;
use super::rate_limit::{ApiCategory, RateLimiterSet};
use crate::error::{ApiError, AuthError, Result};

/// Admin SDK base URL
pub const DIRECTORY_BASE_URL: &str = "https://admin.googleapis.com";

/// Cloud Resource Manager base URL
pub const RESOURCE_MANAGER_BASE_URL: &str = "https://cloudresourcemanager.googleapis.com";

/// OAuth 2.0 JWT bearer grant (RFC 7523)
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a server-provided Retry-After
const MAX_RETRY_AFTER_SECS: u64 = 60;

/// Endpoint and retry settings for [`GoogleClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub directory_url: String,
    pub resource_manager_url: String,
    /// Retries after a 429 before giving up
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            directory_url: DIRECTORY_BASE_URL.to_string(),
            resource_manager_url: RESOURCE_MANAGER_BASE_URL.to_string(),
            max_retries: 3,
        }
    }
}

/// Google API client acting as a service account with domain-wide delegation
pub struct GoogleClient {
    http: HttpClient,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    directory_url: String,
    resource_manager_url: String,
    max_retries: u32,
    limiters: RateLimiterSet,
}

/// Google's JSON error envelope: `{"error": {"code": 403, "message": "..."}}`
#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Best human-readable message from an error response body
fn error_message(body: &str, status: StatusCode) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn retry_after(response: &Response) -> Duration {
    let secs = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1);
    Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS))
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

impl GoogleClient {
    /// Create a client for the given key; fails if the private key is unusable.
    pub fn new(key: ServiceAccountKey, options: ClientOptions) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let encoding_key = key.encoding_key()?;

        Ok(Self {
            http,
            key,
            encoding_key,
            directory_url: trim_base(&options.directory_url),
            resource_manager_url: trim_base(&options.resource_manager_url),
            max_retries: options.max_retries,
            limiters: RateLimiterSet::new(),
        })
    }

    /// Send a request, retrying on 429.
    ///
    /// `build` is called once per attempt. A 429 activates the category's
    /// rate limiter for the rest of the run.
    async fn send<F>(&self, category: ApiCategory, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            self.limiters.wait_for(category).await;

            let response = build().send().await.map_err(ApiError::from)?;
            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            self.limiters.activate(category);
            let wait = retry_after(&response);
            if attempt >= self.max_retries {
                return Err(ApiError::RateLimit(wait).into());
            }

            attempt += 1;
            debug!(
                "{:?} returned 429, retry {}/{} in {:?}",
                category, attempt, self.max_retries, wait
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Authenticated GET returning a JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        category: ApiCategory,
        url: &str,
        token: &AccessToken,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        debug!("GET {} as {}", url, token.subject);

        let response = self
            .send(category, || {
                self.http
                    .get(url)
                    .bearer_auth(&token.token)
                    .query(query)
            })
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, status);
        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            status if status.is_server_error() => ApiError::ServerError(message),
            status => ApiError::InvalidResponse(format!(
                "Unexpected status code {}: {}",
                status, message
            )),
        };
        Err(err.into())
    }
}

#[async_trait]
impl AuthApi for GoogleClient {
    async fn authorize(&self, subject: &str, scope: Scope) -> Result<AccessToken> {
        let now = Utc::now();
        let assertion = sign_assertion(&self.key, &self.encoding_key, subject, scope, now)?;

        let response = self
            .send(ApiCategory::Token, || {
                self.http.post(&self.key.token_uri).form(&[
                    ("grant_type", JWT_BEARER_GRANT),
                    ("assertion", assertion.as_str()),
                ])
            })
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.to_string(),
                Err(_) => error_message(&body, status),
            };
            return Err(AuthError::TokenExchange {
                subject: subject.to_string(),
                reason,
            }
            .into());
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        debug!("Authorized {} ({}s)", subject, token.expires_in);
        Ok(AccessToken {
            token: token.access_token,
            subject: subject.to_string(),
            scope,
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl DirectoryApi for GoogleClient {
    async fn list_users_page(
        &self,
        token: &AccessToken,
        params: &UserListParams,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        let url = format!("{}/admin/directory/v1/users", self.directory_url);
        let query = params.to_query_params(page_token);

        let page: UsersPage = self
            .get_json(ApiCategory::Directory, &url, token, &query)
            .await?;
        Ok(page.into())
    }
}

#[async_trait]
impl ResourceManagerApi for GoogleClient {
    async fn list_projects_page(
        &self,
        token: &AccessToken,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Project>> {
        let url = format!("{}/v1/projects", self.resource_manager_url);
        let mut query = vec![("pageSize", page_size.to_string())];
        if let Some(page_token) = page_token {
            query.push(("pageToken", page_token.to_string()));
        }

        let page: ProjectsPage = self
            .get_json(ApiCategory::ResourceManager, &url, token, &query)
            .await?;
        Ok(page.into())
    }
}
