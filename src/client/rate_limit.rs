//! Per-API rate limiting for Google endpoints
//!
//! Implements reactive rate limiting that only activates after receiving a 429.
//! Each API has its own quota, so a 429 from one does not slow the others.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

/// Google APIs called by fadup, with their default per-user quotas.
///
/// - OAuth token endpoint: unpublished, kept conservative at 10/sec
/// - Admin SDK Directory API: 2400/min (40/sec)
/// - Cloud Resource Manager reads: 600/min (10/sec)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiCategory {
    /// `POST {token_uri}`
    Token,
    /// `GET /admin/directory/v1/users`
    Directory,
    /// `GET /v1/projects`
    ResourceManager,
}

impl ApiCategory {
    /// All categories for initialization.
    pub const ALL: [ApiCategory; 3] = [
        ApiCategory::Token,
        ApiCategory::Directory,
        ApiCategory::ResourceManager,
    ];

    /// Requests per second allowed once limiting is active.
    pub fn rate_limit(&self) -> u32 {
        match self {
            ApiCategory::Token => 10,
            ApiCategory::Directory => 40,
            ApiCategory::ResourceManager => 10,
        }
    }
}

/// Rate limiter state for a single API category.
pub struct ApiRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    category: ApiCategory,
}

impl ApiRateLimiter {
    pub fn new(category: ApiCategory) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(category.rate_limit()).unwrap_or(NonZeroU32::MIN),
        );

        Self {
            limiter: RateLimiter::direct(quota),
            active: AtomicBool::new(false),
            category,
        }
    }

    /// Activate rate limiting for this category.
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?}", self.category);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for permission if rate limiting is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            self.limiter.until_ready().await;
        }
    }
}

/// Collection of rate limiters for all API categories.
pub struct RateLimiterSet {
    limiters: HashMap<ApiCategory, ApiRateLimiter>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    pub fn new() -> Self {
        let limiters = ApiCategory::ALL
            .into_iter()
            .map(|category| (category, ApiRateLimiter::new(category)))
            .collect();

        Self { limiters }
    }

    /// Wait for rate limit permission for a category (if active).
    pub async fn wait_for(&self, category: ApiCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.wait_if_active().await;
        }
    }

    /// Activate rate limiting for a category (called on 429).
    pub fn activate(&self, category: ApiCategory) {
        if let Some(limiter) = self.limiters.get(&category) {
            limiter.activate();
        }
    }

    #[cfg(test)]
    pub fn is_active(&self, category: ApiCategory) -> bool {
        self.limiters
            .get(&category)
            .map(|l| l.is_active())
            .unwrap_or(false)
    }
}
