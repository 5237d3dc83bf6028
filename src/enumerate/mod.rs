//! The enumeration pipeline
//!
//! [`enumerate_users`] lists the active users of the Workspace account, then
//! [`enumerate_projects`] lists the projects each of them can access. The
//! first stage's output is handed to the second unchanged.

mod projects;
mod users;

pub use projects::{ProjectListOptions, enumerate_projects};
pub use users::enumerate_users;
