//! Command execution context
//!
//! Loads the config file, merges command-line overrides, loads the service
//! account key and builds the API client.

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{GoogleClient, ServiceAccountKey, UserListParams};
use crate::config::{Config, Settings};
use crate::enumerate::ProjectListOptions;
use crate::error::Result;

/// Context for command execution containing settings, client, and output format.
pub struct CommandContext {
    /// Resolved and validated settings
    pub settings: Settings,
    /// Client acting as the configured service account
    pub client: GoogleClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded, a required setting is
    /// missing, or the key file is unusable.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let settings = Config::load(opts.config_ref())?
            .merge(opts.overrides.clone())
            .settings()?;

        let key = ServiceAccountKey::load(&settings.key_file)?;
        debug!(
            "Using service account {} for customer {}",
            key.client_email, settings.customer_id
        );

        let client = GoogleClient::new(key, settings.client.clone())?;

        Ok(Self {
            settings,
            client,
            format: opts.format,
        })
    }

    pub fn user_list_params(&self) -> UserListParams {
        UserListParams::new(self.settings.customer_id.clone()).page_size(self.settings.page_size)
    }

    pub fn project_list_options(&self) -> ProjectListOptions {
        ProjectListOptions {
            page_size: self.settings.page_size,
            concurrency: self.settings.concurrency,
        }
    }
}
