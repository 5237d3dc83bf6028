//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::client::models::Scope;
use crate::client::{AuthApi, GoogleClient, ServiceAccountKey};
use crate::config::Config;
use crate::error::Result;

/// Display the resolved configuration and, with `verify`, test delegation
pub async fn run(opts: &GlobalOptions, verify: bool) -> Result<()> {
    println!("{}\n", "fadup Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    let config = Config::load(opts.config_ref())?.merge(opts.overrides.clone());

    show_setting("Customer ID", config.customer_id.as_deref());
    show_setting("Super admin", config.super_admin.as_deref());
    show_setting(
        "Key file",
        config.key_file.as_ref().map(|p| p.display().to_string()).as_deref(),
    );
    println!("{} Concurrency: {}", "○".dimmed(), config.concurrency());
    println!("{} Page size: {}", "○".dimmed(), config.page_size());
    println!();

    let key = match &config.key_file {
        Some(path) => match ServiceAccountKey::load(path) {
            Ok(key) => {
                match &key.project_id {
                    Some(project) => println!(
                        "{} Service account: {} (project {})",
                        "✓".green(),
                        key.client_email,
                        project
                    ),
                    None => println!("{} Service account: {}", "✓".green(), key.client_email),
                }
                Some(key)
            }
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                None
            }
        },
        None => None,
    };

    let settings = config.settings();
    if let Err(ref e) = settings {
        println!("{} {}", "✗".red(), e);
        println!("  → Run '{}' to configure", "fadup init".cyan());
    }

    if verify {
        let settings = settings?;
        let key = match key {
            Some(key) => key,
            None => ServiceAccountKey::load(&settings.key_file)?,
        };
        let client = GoogleClient::new(key, settings.client.clone())?;
        client
            .authorize(&settings.super_admin, Scope::DirectoryUser)
            .await?;
        println!(
            "{} Token exchange as {} succeeded",
            "✓".green(),
            settings.super_admin
        );
    }

    println!();
    Ok(())
}

fn show_setting(label: &str, value: Option<&str>) {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => println!("{} {}: {}", "✓".green(), label, v),
        None => println!("{} {} not configured", "✗".red(), label),
    }
}
