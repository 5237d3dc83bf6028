//! Mock Google API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use super::api::{AuthApi, DirectoryApi, ResourceManagerApi, UserListParams};
use super::models::{AccessToken, Project, Scope};
use super::pagination::Page;
use crate::error::{ApiError, AuthError, Result};

/// Mock API client for testing.
///
/// Configure pages via builder methods, then use in tests. Cursors are
/// `page-1`, `page-2`, ... and project pages are selected by the token's
/// subject, so a token issued for the wrong user sees the wrong projects.
///
/// # Example
/// ```ignore
/// let mock = MockGoogleClient::new()
///     .with_user_pages(vec![vec!["a@x.com".into()], vec!["b@x.com".into()]])
///     .with_projects("a@x.com", vec![vec![project("P1", "id1", "111")]]);
/// ```
pub struct MockGoogleClient {
    /// Pages returned by list_users_page
    user_pages: Vec<Vec<String>>,
    /// Project pages per impersonated subject
    projects: HashMap<String, Vec<Vec<Project>>>,
    /// Subjects whose token exchange fails
    failing_subjects: HashSet<String>,
    /// Lifetime of issued tokens
    token_lifetime: Duration,
    /// Return the same user cursor forever
    stuck_user_cursor: bool,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// (subject, scope) of every authorization, in order
    sessions: Arc<Mutex<Vec<(String, Scope)>>>,
    /// Page tokens received by list_users_page, in order
    user_page_tokens: Arc<Mutex<Vec<Option<String>>>>,
}

impl Default for MockGoogleClient {
    fn default() -> Self {
        Self {
            user_pages: Vec::new(),
            projects: HashMap::new(),
            failing_subjects: HashSet::new(),
            token_lifetime: Duration::hours(1),
            stuck_user_cursor: false,
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            sessions: Arc::new(Mutex::new(Vec::new())),
            user_page_tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authorize: usize,
    pub list_users: usize,
    pub list_projects: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.authorize + self.list_users + self.list_projects
    }
}

/// Shorthand for building a project in tests
pub fn project(name: &str, id: &str, number: &str) -> Project {
    Project {
        name: name.to_string(),
        project_id: id.to_string(),
        project_number: number.to_string(),
    }
}

/// `count` distinct emails `user-{offset}@x.com`, `user-{offset+1}@x.com`, ...
pub fn emails(offset: usize, count: usize) -> Vec<String> {
    (offset..offset + count)
        .map(|i| format!("user-{}@x.com", i))
        .collect()
}

fn page_index(page_token: Option<&str>) -> usize {
    page_token
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn paged<T: Clone>(pages: &[Vec<T>], page_token: Option<&str>) -> Page<T> {
    let index = page_index(page_token);
    let items = pages.get(index).cloned().unwrap_or_default();
    let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
    Page::new(items, next)
}

impl MockGoogleClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the pages returned by the user listing.
    pub fn with_user_pages(mut self, pages: Vec<Vec<String>>) -> Self {
        self.user_pages = pages;
        self
    }

    /// Configure the project pages visible to one user.
    pub fn with_projects(mut self, subject: &str, pages: Vec<Vec<Project>>) -> Self {
        self.projects.insert(subject.to_string(), pages);
        self
    }

    /// Make token exchange fail for one subject.
    pub fn with_failing_subject(mut self, subject: &str) -> Self {
        self.failing_subjects.insert(subject.to_string());
        self
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Make every user page return the same continuation token.
    pub fn with_stuck_user_cursor(mut self) -> Self {
        self.stuck_user_cursor = true;
        self
    }

    /// Set a one-shot error for the next API call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn authorized_sessions(&self) -> Vec<(String, Scope)> {
        self.sessions.lock().await.clone()
    }

    pub async fn user_page_tokens(&self) -> Vec<Option<String>> {
        self.user_page_tokens.lock().await.clone()
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    fn check_scope(token: &AccessToken, expected: Scope) -> Result<()> {
        if token.scope != expected {
            return Err(ApiError::Forbidden(format!(
                "token scope {} cannot call this API",
                token.scope
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockGoogleClient {
    async fn authorize(&self, subject: &str, scope: Scope) -> Result<AccessToken> {
        self.call_count.lock().await.authorize += 1;
        self.check_error().await?;

        if self.failing_subjects.contains(subject) {
            return Err(AuthError::TokenExchange {
                subject: subject.to_string(),
                reason: "unauthorized_client".to_string(),
            }
            .into());
        }

        let mut sessions = self.sessions.lock().await;
        sessions.push((subject.to_string(), scope));

        Ok(AccessToken {
            token: format!("mock-token-{}", sessions.len()),
            subject: subject.to_string(),
            scope,
            expires_at: Utc::now() + self.token_lifetime,
        })
    }
}

#[async_trait]
impl DirectoryApi for MockGoogleClient {
    async fn list_users_page(
        &self,
        token: &AccessToken,
        _params: &UserListParams,
        page_token: Option<&str>,
    ) -> Result<Page<String>> {
        self.call_count.lock().await.list_users += 1;
        self.user_page_tokens
            .lock()
            .await
            .push(page_token.map(str::to_string));
        self.check_error().await?;
        Self::check_scope(token, Scope::DirectoryUser)?;

        if self.stuck_user_cursor {
            return Ok(Page::new(Vec::new(), Some("page-1".to_string())));
        }

        Ok(paged(&self.user_pages, page_token))
    }
}

#[async_trait]
impl ResourceManagerApi for MockGoogleClient {
    async fn list_projects_page(
        &self,
        token: &AccessToken,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Project>> {
        self.call_count.lock().await.list_projects += 1;
        self.check_error().await?;
        Self::check_scope(token, Scope::CloudPlatform)?;

        match self.projects.get(&token.subject) {
            Some(pages) => Ok(paged(pages, page_token)),
            None => Ok(Page::new(Vec::new(), None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn token(mock: &MockGoogleClient, subject: &str, scope: Scope) -> AccessToken {
        mock.authorize(subject, scope).await.unwrap()
    }

    #[tokio::test]
    async fn test_mock_user_pages_chain_cursors() {
        let mock =
            MockGoogleClient::new().with_user_pages(vec![emails(0, 2), emails(2, 1)]);
        let admin = token(&mock, "admin@x.com", Scope::DirectoryUser).await;
        let params = UserListParams::new("C123");

        let first = mock.list_users_page(&admin, &params, None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.next_page_token.as_deref(), Some("page-1"));

        let second = mock
            .list_users_page(&admin, &params, Some("page-1"))
            .await
            .unwrap();
        assert_eq!(second.items, vec!["user-2@x.com"]);
        assert!(second.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_mock_projects_follow_token_subject() {
        let mock = MockGoogleClient::new()
            .with_projects("a@x.com", vec![vec![project("P1", "id1", "111")]]);

        let a = token(&mock, "a@x.com", Scope::CloudPlatform).await;
        let b = token(&mock, "b@x.com", Scope::CloudPlatform).await;

        assert_eq!(mock.list_projects_page(&a, 500, None).await.unwrap().items.len(), 1);
        assert!(mock.list_projects_page(&b, 500, None).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_mock_rejects_wrong_scope() {
        let mock = MockGoogleClient::new();
        let admin = token(&mock, "admin@x.com", Scope::DirectoryUser).await;

        let result = mock.list_projects_page(&admin, 500, None).await;
        assert!(matches!(
            result,
            Err(crate::error::Error::Api(ApiError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockGoogleClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.authorize("a@x.com", Scope::CloudPlatform).await.is_err());
        assert!(mock.authorize("a@x.com", Scope::CloudPlatform).await.is_ok());
        assert_eq!(mock.call_counts().await.total(), 2);
    }
}
