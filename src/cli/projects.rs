//! Projects command: the full two-stage report

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::cli::{CommandContext, GlobalOptions};
use crate::enumerate::{enumerate_projects, enumerate_users};
use crate::error::Result;
use crate::output;

/// List users, then each user's projects, then print the report.
///
/// Nothing is printed unless both stages succeed.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let spinner = user_spinner();
    let users = enumerate_users(
        &ctx.client,
        &ctx.settings.super_admin,
        &ctx.user_list_params(),
    )
    .await;
    spinner.finish_and_clear();
    let users = users?;
    info!("Listing projects for {} users", users.len());

    let progress = project_progress(users.len());
    let records = enumerate_projects(
        &ctx.client,
        &users,
        ctx.project_list_options(),
        &progress,
    )
    .await;
    progress.finish_and_clear();
    let records = records?;

    output::print(records.as_slice(), ctx.format)
}

// Both bars draw on stderr and stay hidden when it is not a terminal.

fn user_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} Listing users...") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn project_progress(users: usize) -> ProgressBar {
    let bar = ProgressBar::new(users as u64);
    if let Ok(style) =
        ProgressStyle::with_template("Listing projects [{bar:30}] {pos}/{len} users ({eta})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
