//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::VenueFilter;

/// Resolve command arguments.
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Venue ids to resolve
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Venue id to render
    pub id: String,

    /// Size preset: thumbnail, card or hero (unknown names mean card)
    #[arg(short, long)]
    pub size: Option<String>,

    /// Output the display unit as JSON instead of markup
    #[arg(short, long)]
    pub json: bool,

    /// Append the fallback <script> element after the markup
    #[arg(long)]
    pub with_script: bool,
}

/// Preload command arguments.
#[derive(Debug, Args)]
pub struct PreloadCommand {
    /// Number of leading venues to consider (defaults to config)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Listing to take the leading venues from
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Listing filters
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Validate command arguments.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file (defaults to config `data.export_path`)
    pub output: Option<PathBuf>,

    /// Print what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
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

/// Venue listing filters shared by several commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only this category (museum, park, playhouse, ...)
    #[arg(long)]
    pub category: Option<String>,

    /// Only this region (hk-island, kowloon, nt)
    #[arg(long)]
    pub region: Option<String>,

    /// Only districts containing this text
    #[arg(long)]
    pub district: Option<String>,

    /// Only venues suitable for a child of this age
    #[arg(long)]
    pub age: Option<u8>,

    /// Only this price tier (free, low, medium, high)
    #[arg(long)]
    pub price: Option<String>,

    /// Only indoor venues
    #[arg(long)]
    pub indoor: bool,

    /// Only rainy-day venues
    #[arg(long)]
    pub rainy: bool,

    /// Only free venues
    #[arg(long)]
    pub free: bool,

    /// Only venues with a real image
    #[arg(long)]
    pub with_image: bool,
}

impl From<&FilterArgs> for VenueFilter {
    fn from(args: &FilterArgs) -> Self {
        Self {
            category: args.category.as_deref().map(Into::into),
            region: args.region.as_deref().map(Into::into),
            district: args.district.clone(),
            age: args.age,
            price: args.price.as_deref().map(Into::into),
            indoor_only: args.indoor,
            rainy_day_only: args.rainy,
            free_only: args.free,
            with_image_only: args.with_image,
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{Category, PriceTier, Region};

    #[test]
    fn test_filter_args_conversion() {
        let args = FilterArgs {
            category: Some("museum".to_string()),
            region: Some("kowloon".to_string()),
            age: Some(5),
            price: Some("free".to_string()),
            rainy: true,
            ..FilterArgs::default()
        };
        let filter = VenueFilter::from(&args);

        assert_eq!(filter.category, Some(Category::Museum));
        assert_eq!(filter.region, Some(Region::Kowloon));
        assert_eq!(filter.price, Some(PriceTier::Free));
        assert_eq!(filter.age, Some(5));
        assert!(filter.rainy_day_only);
        assert!(!filter.indoor_only);
    }

    #[test]
    fn test_default_filter_args_match_everything() {
        assert_eq!(VenueFilter::from(&FilterArgs::default()), VenueFilter::new());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_render_command_debug() {
        let cmd = RenderCommand {
            id: "011".to_string(),
            size: Some("hero".to_string()),
            json: false,
            with_script: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("011"));
        assert!(debug_str.contains("hero"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
