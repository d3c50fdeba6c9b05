//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Name for the record
    #[arg(short, long)]
    pub name: Option<String>,

    /// Pre-fill the name from this roster index (see `growlog children`)
    #[arg(long, value_name = "INDEX", conflicts_with = "name")]
    pub child: Option<usize>,

    /// Weight in kilograms (digits, shaped to the 99.99 mask)
    #[arg(short, long)]
    pub weight: String,

    /// Height in meters (digits, shaped to the 9.99 mask)
    #[arg(long)]
    pub height: String,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Zero-based index of the record to edit
    pub index: usize,

    /// New name (unchanged if omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// New weight in kilograms (unchanged if omitted)
    #[arg(short, long)]
    pub weight: Option<String>,

    /// New height in meters (unchanged if omitted)
    #[arg(long)]
    pub height: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Zero-based index of the record to delete
    pub index: usize,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Chart command arguments.
#[derive(Debug, Args)]
pub struct ChartCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Children command arguments.
#[derive(Debug, Args)]
pub struct ChildrenCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
