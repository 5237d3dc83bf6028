//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completion;
pub mod context;
pub mod init;
pub mod projects;
pub mod status;
pub mod users;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// fadup - Find All Domain User Projects
///
/// Lists every Google Cloud project visible to each active user of a Google
/// Workspace account, using a service account with domain-wide delegation.
#[derive(Parser, Debug)]
#[command(name = "fadup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `projects`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (csv, table, json)
    #[arg(
        long,
        global = true,
        env = "FADUP_FORMAT",
        default_value = "csv",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Workspace customer ID
    #[arg(long, global = true, env = "FADUP_CUSTOMER_ID", hide_env = true)]
    pub customer_id: Option<String>,

    /// Super-admin email impersonated to list users
    #[arg(long, global = true, env = "FADUP_SUPER_ADMIN", hide_env = true)]
    pub super_admin: Option<String>,

    /// Service account JSON key file
    #[arg(long, global = true, env = "FADUP_KEY_FILE", hide_env = true)]
    pub key_file: Option<PathBuf>,

    /// Users whose projects are listed at the same time
    #[arg(long, global = true, env = "FADUP_CONCURRENCY", hide_env = true)]
    pub concurrency: Option<usize>,

    /// Items requested per API page (1-500)
    #[arg(long, global = true, env = "FADUP_PAGE_SIZE", hide_env = true)]
    pub page_size: Option<u32>,

    /// Override Directory API base URL
    #[arg(long, global = true, env = "FADUP_DIRECTORY_URL", hide = true)]
    pub directory_url: Option<String>,

    /// Override Resource Manager API base URL
    #[arg(long, global = true, env = "FADUP_RESOURCE_MANAGER_URL", hide = true)]
    pub resource_manager_url: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "FADUP_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FADUP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every (user, project) pair in the domain
    #[command(after_help = "EXAMPLES:\n  \
            fadup                                    # csv lines: email, name, id, number\n  \
            fadup projects --concurrency 8           # list 8 users at a time\n  \
            fadup projects --format table            # human-readable table")]
    Projects,

    /// List active (non-suspended) users
    Users,

    /// Show configuration status
    Status {
        /// Also perform a token exchange as the super admin
        #[arg(long)]
        verify: bool,
    },

    /// Initialize fadup configuration
    Init,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   fadup completion bash > /etc/bash_completion.d/fadup
  zsh:    fadup completion zsh > \"${fpath[1]}/_fadup\"
  fish:   fadup completion fish > ~/.config/fish/completions/fadup.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_projects() {
        let cli = Cli::try_parse_from(["fadup"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fadup",
            "users",
            "--format",
            "table",
            "--page-size",
            "100",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Users)));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.page_size, Some(100));
    }

    #[test]
    fn test_status_verify_flag() {
        let cli = Cli::try_parse_from(["fadup", "status", "--verify"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { verify: true })));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["fadup", "--format", "pretty"]).is_err());
    }
}
