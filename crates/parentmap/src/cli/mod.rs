//! Command-line interface for parentmap.
//!
//! This module provides the CLI structure for the `pmhk` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExportCommand, FilterArgs, ListCommand, OutputFormat, PreloadCommand,
    RenderCommand, ResolveCommand, ValidateCommand,
};

use crate::logging::Verbosity;

/// pmhk - Family venue catalog for Hong Kong
///
/// Loads venue datasets, resolves and renders venue images, emits preload
/// hints, and validates or exports the catalog.
#[derive(Debug, Parser)]
#[command(name = "pmhk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset file to load instead of the configured ones (repeatable)
    #[arg(short, long = "data", global = true, value_name = "FILE")]
    pub data: Vec<PathBuf>,

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
    /// Show which image each venue resolves to
    Resolve(ResolveCommand),

    /// Render a venue's image display unit
    Render(RenderCommand),

    /// Print preload hints for the head of a listing
    Preload(PreloadCommand),

    /// List venues
    List(ListCommand),

    /// Validate venue records
    Validate(ValidateCommand),

    /// Export the catalog as JSON
    Export(ExportCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "pmhk");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["pmhk", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["pmhk", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_resolve_many() {
        let cli = Cli::try_parse_from(["pmhk", "resolve", "001", "011"]).unwrap();
        match cli.command {
            Command::Resolve(cmd) => assert_eq!(cmd.ids, vec!["001", "011"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_resolve_requires_id() {
        assert!(Cli::try_parse_from(["pmhk", "resolve"]).is_err());
    }

    #[test]
    fn test_parse_render_accepts_any_size() {
        let cli = Cli::try_parse_from(["pmhk", "render", "011", "--size", "banner"]).unwrap();
        match cli.command {
            Command::Render(cmd) => assert_eq!(cmd.size.as_deref(), Some("banner")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_preload_with_filter() {
        let cli = Cli::try_parse_from(["pmhk", "preload", "--limit", "2", "--category", "park"])
            .unwrap();
        match cli.command {
            Command::Preload(cmd) => {
                assert_eq!(cmd.limit, Some(2));
                assert_eq!(cmd.filter.category.as_deref(), Some("park"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_format() {
        let cli = Cli::try_parse_from(["pmhk", "list", "--format", "json", "--free"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.format, OutputFormat::Json);
                assert!(cmd.filter.free);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_data_and_config() {
        let cli = Cli::try_parse_from([
            "pmhk",
            "validate",
            "--data",
            "a.json",
            "-d",
            "b.json",
            "-c",
            "/custom/config.toml",
        ])
        .unwrap();
        assert_eq!(cli.data, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["pmhk", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }
}
