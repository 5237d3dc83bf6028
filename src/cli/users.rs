//! Users command: stage 1 only

use crate::cli::{CommandContext, GlobalOptions};
use crate::enumerate::enumerate_users;
use crate::error::Result;
use crate::models::UserRecord;
use crate::output;

/// Print the primary email of every active user
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let users = enumerate_users(
        &ctx.client,
        &ctx.settings.super_admin,
        &ctx.user_list_params(),
    )
    .await?;

    let records: Vec<UserRecord> = users.into_iter().map(UserRecord::from).collect();
    output::print(records.as_slice(), ctx.format)
}
