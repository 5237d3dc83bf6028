//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated lines, one record per line (default)
    #[default]
    Csv,
    /// Table format - human-readable, one row per record
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}
