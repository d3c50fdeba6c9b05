//! Command-line interface for growlog.
//!
//! This module provides the CLI structure and command handlers for the
//! `growlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ChartCommand, ChildrenCommand, ConfigCommand, DeleteCommand, EditCommand,
    ListCommand, OutputFormat, StatusCommand,
};

/// growlog - Track children's growth measurements
///
/// A local tracker for children's weight and height: saves measurements,
/// computes a body-mass index with a weight category, and keeps the full
/// history for listing and charting.
#[derive(Debug, Parser)]
#[command(name = "growlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a new measurement
    Add(AddCommand),

    /// Edit a saved measurement
    Edit(EditCommand),

    /// Delete a saved measurement
    Delete(DeleteCommand),

    /// List saved measurements with their categories
    List(ListCommand),

    /// Show the chart data series
    Chart(ChartCommand),

    /// List the child roster
    Children(ChildrenCommand),

    /// Show store status
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "growlog");
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli {
            config: None,
            verbose: 1,
            quiet: false,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli {
            config: None,
            verbose: 2,
            quiet: false,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let args = vec![
            "growlog", "add", "--name", "Ana", "--weight", "1250", "--height", "090",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.name.as_deref(), Some("Ana"));
                assert!(cmd.child.is_none());
                assert_eq!(cmd.weight, "1250");
                assert_eq!(cmd.height, "090");
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_with_child() {
        let args = vec![
            "growlog", "add", "--child", "1", "--weight", "1250", "--height", "090",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Add(cmd) => assert_eq!(cmd.child, Some(1)),
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_name_child_conflict() {
        let args = vec![
            "growlog", "add", "--name", "Ana", "--child", "0", "--weight", "1250", "--height",
            "090",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_add_requires_weight_and_height() {
        let args = vec!["growlog", "add", "--name", "Ana"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_edit() {
        let args = vec!["growlog", "edit", "0", "--weight", "1300"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Edit(cmd) => {
                assert_eq!(cmd.index, 0);
                assert!(cmd.name.is_none());
                assert_eq!(cmd.weight.as_deref(), Some("1300"));
                assert!(cmd.height.is_none());
            }
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let args = vec!["growlog", "delete", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Delete(cmd) => assert_eq!(cmd.index, 2),
            other => panic!("expected delete, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_default_format() {
        let args = vec!["growlog", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Table),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_json() {
        let args = vec!["growlog", "list", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_chart() {
        let args = vec!["growlog", "chart"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Chart(cmd) => assert_eq!(cmd.format, OutputFormat::Plain),
            other => panic!("expected chart, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_children() {
        let args = vec!["growlog", "children"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Children(_)));
    }

    #[test]
    fn test_parse_status_json() {
        let args = vec!["growlog", "status", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Status(cmd) => assert!(cmd.json),
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_path() {
        let args = vec!["growlog", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["growlog", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let args = vec!["growlog", "-v", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["growlog", "-q", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.quiet);
    }
}
