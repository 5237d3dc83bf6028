//! Global CLI options shared across all commands
//!
//! Collects the global flags once so handlers take a single argument.

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::config::ConfigOverrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the config file is merged in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (csv, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.fadup/config.yaml)
    pub config: Option<PathBuf>,

    /// Settings given as flags or `FADUP_*` variables
    pub overrides: ConfigOverrides,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            overrides: ConfigOverrides {
                customer_id: cli.customer_id.clone(),
                super_admin: cli.super_admin.clone(),
                key_file: cli.key_file.clone(),
                concurrency: cli.concurrency,
                page_size: cli.page_size,
                directory_url: cli.directory_url.clone(),
                resource_manager_url: cli.resource_manager_url.clone(),
            },
        }
    }

    pub fn config_ref(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}
