//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Token exchange for an impersonated user
//! - [`DirectoryApi`] - Workspace user listing
//! - [`ResourceManagerApi`] - Cloud project listing
//!
//! Each listing takes the token of the session it runs under, so one client
//! serves every impersonated user.

mod auth;
mod directory;
mod resource_manager;

pub use auth::AuthApi;
pub use directory::{DirectoryApi, UserListParams};
pub use resource_manager::ResourceManagerApi;
