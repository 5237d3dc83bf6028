//! Google API data models
//!
//! Wire types for the OAuth token endpoint, the Admin SDK Directory API and
//! the Cloud Resource Manager API.

mod auth;
mod project;
mod user;

pub use auth::{AccessToken, Scope, TokenErrorResponse, TokenResponse};
pub use project::{Project, ProjectsPage};
pub use user::UsersPage;
