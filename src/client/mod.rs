//! Google Workspace and Cloud API client

#[cfg(test)]
pub mod mock;

pub mod api;
pub mod credentials;
pub mod google;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod rate_limit;
pub mod session;

pub use api::{AuthApi, DirectoryApi, ResourceManagerApi, UserListParams};
pub use credentials::ServiceAccountKey;
pub use google::{ClientOptions, GoogleClient};
#[cfg(test)]
pub use mock::MockGoogleClient;
pub use pagination::{Cursor, MAX_PAGE_SIZE};
pub use parallel::fetch_each;
pub use session::Session;
