//! Init command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::ServiceAccountKey;
use crate::config::Config;
use crate::error::Result;

/// Prompt for the required settings and save them to the config file.
///
/// Values already in the config file (or given as flags) are offered as
/// defaults. Optional settings already in the file are kept.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to fadup!".bold().green());
    println!("Let's set up access to your Google Workspace account.\n");

    let existing = match Config::load(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => Config::default(),
    }
    .merge(opts.overrides.clone());

    let theme = ColorfulTheme::default();

    let customer_id = prompt(&theme, "Workspace customer ID", existing.customer_id.clone())?;
    let super_admin = prompt(&theme, "Super-admin email", existing.super_admin.clone())?;

    let mut key_input = Input::<String>::with_theme(&theme)
        .with_prompt("Service account key file")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            ServiceAccountKey::load(Path::new(input.trim()))
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Some(path) = &existing.key_file {
        key_input = key_input.default(path.display().to_string());
    }
    let key_file = PathBuf::from(key_input.interact_text()?.trim());
    let key = ServiceAccountKey::load(&key_file)?;

    println!("{} Service account: {}", "✓".green(), key.client_email);

    let config = Config {
        customer_id: Some(customer_id),
        super_admin: Some(super_admin),
        key_file: Some(key_file),
        ..existing
    };

    let config_path = Config::resolve_path(opts.config_ref())?;
    config.save_to(&config_path)?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Verify domain-wide delegation", "fadup status --verify".cyan());
    println!("  {} - List every user's projects", "fadup".cyan());

    Ok(())
}

fn prompt(theme: &ColorfulTheme, label: &str, current: Option<String>) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(label);
    if let Some(value) = current {
        input = input.default(value);
    }
    Ok(input.interact_text()?.trim().to_string())
}
