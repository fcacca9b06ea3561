//! `pmhk` - CLI for parentmap
//!
//! This binary provides the command-line interface for inspecting venue
//! datasets and producing image markup.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use parentmap::cli::{
    Cli, Command, ConfigCommand, ExportCommand, ListCommand, OutputFormat, PreloadCommand,
    RenderCommand, ResolveCommand, ValidateCommand,
};
use parentmap::images::{fallback_script_tag, HeadRegistry, SizePreset};
use parentmap::{init_logging, Catalog, Config, Resolver, Validator, VenueFilter};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    let paths = if cli.data.is_empty() {
        config.data.paths.clone()
    } else {
        cli.data.clone()
    };
    let load_catalog = || Catalog::load_all(&paths).context("loading venue datasets");
    let resolver = Resolver::from_config(&config.images);

    match cli.command {
        Command::Resolve(cmd) => handle_resolve(&load_catalog()?, &resolver, &cmd),
        Command::Render(cmd) => handle_render(&load_catalog()?, &resolver, &config, &cmd),
        Command::Preload(cmd) => {
            handle_preload(&load_catalog()?, &resolver, &config, &cmd);
            Ok(ExitCode::SUCCESS)
        }
        Command::List(cmd) => handle_list(&load_catalog()?, &resolver, &cmd),
        Command::Validate(cmd) => handle_validate(&load_catalog()?, &cmd),
        Command::Export(cmd) => handle_export(&load_catalog()?, &config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_resolve(
    catalog: &Catalog,
    resolver: &Resolver,
    cmd: &ResolveCommand,
) -> anyhow::Result<ExitCode> {
    let mut resolved = Vec::with_capacity(cmd.ids.len());
    for id in &cmd.ids {
        let venue = catalog.require(id)?;
        resolved.push((id, resolver.resolve(Some(venue))));
    }

    if cmd.json {
        let json: Vec<_> = resolved
            .iter()
            .map(|(id, image)| serde_json::json!({ "id": id, "url": image.url, "source": image.source }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for (id, image) in &resolved {
            println!("{id}\t{}\t{}", image.source, image.url);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_render(
    catalog: &Catalog,
    resolver: &Resolver,
    config: &Config,
    cmd: &RenderCommand,
) -> anyhow::Result<ExitCode> {
    let venue = catalog.require(&cmd.id)?;
    let preset = cmd
        .size
        .as_deref()
        .map_or(config.images.default_size, SizePreset::from);
    let unit = resolver.render(Some(venue), preset);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&unit)?);
    } else {
        println!("{}", unit.to_html());
        if cmd.with_script {
            println!("{}", fallback_script_tag());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_preload(catalog: &Catalog, resolver: &Resolver, config: &Config, cmd: &PreloadCommand) {
    let filter = VenueFilter::from(&cmd.filter);
    let limit = cmd.limit.unwrap_or(config.images.preload_limit);

    let mut head = HeadRegistry::new();
    resolver.preload(filter.apply(catalog), limit, &mut head);

    if !head.is_empty() {
        println!("{}", head.to_html());
    }
}

fn handle_list(
    catalog: &Catalog,
    resolver: &Resolver,
    cmd: &ListCommand,
) -> anyhow::Result<ExitCode> {
    let filter = VenueFilter::from(&cmd.filter);
    let venues: Vec<_> = filter.apply(catalog).collect();

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&venues)?);
        }
        OutputFormat::Plain => {
            for venue in &venues {
                println!("{} {}", venue.id, venue.name);
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<6} {:<11} {:<10} {:<8} {:<12} NAME",
                "ID", "CATEGORY", "REGION", "AGES", "IMAGE"
            );
            for venue in &venues {
                let image = resolver.resolve(Some(venue));
                println!(
                    "{:<6} {:<11} {:<10} {:<8} {:<12} {}",
                    venue.id,
                    venue.category.as_ref().map_or("-", |c| c.as_str()),
                    venue.region.as_ref().map_or("-", |r| r.as_str()),
                    venue
                        .age_range
                        .map_or_else(|| "-".to_string(), |r| r.to_string()),
                    image.source.to_string(),
                    venue.name
                );
            }
            println!();
            println!("{} of {} venues", venues.len(), catalog.len());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_validate(catalog: &Catalog, cmd: &ValidateCommand) -> anyhow::Result<ExitCode> {
    let report = Validator::new().validate(catalog);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for finding in &report.findings {
            println!("{finding}");
        }
        println!(
            "Checked {} venues: {} errors, {} warnings",
            report.checked,
            report.error_count(),
            report.warning_count()
        );
    }

    Ok(if report.passes(cmd.strict) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_export(
    catalog: &Catalog,
    config: &Config,
    cmd: &ExportCommand,
) -> anyhow::Result<ExitCode> {
    let output = cmd.output.clone().unwrap_or_else(|| config.export_path());

    if cmd.dry_run {
        println!("Would export {} venues to {}", catalog.len(), output.display());
        return Ok(ExitCode::SUCCESS);
    }

    let written = catalog
        .write(&output)
        .with_context(|| format!("exporting to {}", output.display()))?;
    println!("Exported {} venues to {}", catalog.len(), written.display());
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                for path in &config.data.paths {
                    println!("  Dataset:            {}", path.display());
                }
                println!("  Export path:        {}", config.export_path().display());
                println!();
                println!("[Images]");
                println!("  Placeholder prefix: {}", config.images.placeholder_prefix);
                println!(
                    "  Placeholder ext:    {}",
                    config.images.placeholder_extension
                );
                println!("  Fallback category:  {}", config.images.fallback_category);
                println!("  Default size:       {}", config.images.default_size);
                println!("  Preload limit:      {}", config.images.preload_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
