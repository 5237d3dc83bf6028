//! Configuration management for fadup
//!
//! Settings come from CLI flags (which clap already merges with `FADUP_*`
//! environment variables), then the YAML config file, then defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{ClientOptions, MAX_PAGE_SIZE};
use crate::error::{ConfigError, Result};

/// Default number of users whose projects are listed at once
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Default retries after an HTTP 429
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Workspace customer ID (e.g. `C0abc123`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Admin impersonated for the user listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_admin: Option<String>,

    /// Service account JSON key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_manager_url: Option<String>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub customer_id: Option<String>,
    pub super_admin: Option<String>,
    pub key_file: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub page_size: Option<u32>,
    pub directory_url: Option<String>,
    pub resource_manager_url: Option<String>,
}

/// Fully resolved and validated settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub customer_id: String,
    pub super_admin: String,
    pub key_file: PathBuf,
    pub concurrency: usize,
    pub page_size: u32,
    pub client: ClientOptions,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".fadup").join("config.yaml"))
    }

    /// Path to use: the explicit one, or the default
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load the config file.
    ///
    /// An explicitly named file must exist. A missing default file yields an
    /// empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file names the key and the admin account
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply command-line values over the file values
    pub fn merge(self, overrides: ConfigOverrides) -> Self {
        Self {
            customer_id: overrides.customer_id.or(self.customer_id),
            super_admin: overrides.super_admin.or(self.super_admin),
            key_file: overrides.key_file.or(self.key_file),
            concurrency: overrides.concurrency.or(self.concurrency),
            page_size: overrides.page_size.or(self.page_size),
            max_retries: self.max_retries,
            directory_url: overrides.directory_url.or(self.directory_url),
            resource_manager_url: overrides.resource_manager_url.or(self.resource_manager_url),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(MAX_PAGE_SIZE)
    }

    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            directory_url: self.directory_url.clone().unwrap_or(defaults.directory_url),
            resource_manager_url: self
                .resource_manager_url
                .clone()
                .unwrap_or(defaults.resource_manager_url),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        }
    }

    /// Check that required settings are present and values are in range
    pub fn settings(&self) -> Result<Settings> {
        let customer_id = non_empty(&self.customer_id).ok_or(ConfigError::MissingCustomerId)?;
        let super_admin = non_empty(&self.super_admin).ok_or(ConfigError::MissingSuperAdmin)?;
        let key_file = self.key_file.clone().ok_or(ConfigError::MissingKeyFile)?;

        let concurrency = self.concurrency();
        if concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".to_string()).into());
        }

        let page_size = self.page_size();
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::Invalid(format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            ))
            .into());
        }

        Ok(Settings {
            customer_id,
            super_admin,
            key_file,
            concurrency,
            page_size,
            client: self.client_options(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
