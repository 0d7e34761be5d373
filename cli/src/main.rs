//! tlfconv CLI - report layout schema converter

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use tlfconv::{
    detect::inspect_path, downgrade_file, render, upgrade_file_with_options, Error, JsonFormat,
    UpgradeOptions,
};

#[derive(Parser)]
#[command(name = "tlfconv")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Upgrade and downgrade report layout (.tlf) files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade a 0.8.x layout to the 0.9.0 schema
    Upgrade {
        /// Legacy layout file
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output file
        #[arg(value_name = "DEST")]
        destination: PathBuf,

        /// Keep list bounds as the legacy decimal text
        #[arg(long)]
        text_list_bounds: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Downgrade a 0.9.x layout to the legacy schema
    Downgrade {
        /// Current layout file
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output file
        #[arg(value_name = "DEST")]
        destination: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show layout information
    Info {
        /// Layout file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Upgrade {
            source,
            destination,
            text_list_bounds,
            compact,
        }) => cmd_upgrade(&source, &destination, !text_list_bounds, json_format(compact)),
        Some(Commands::Downgrade {
            source,
            destination,
            compact,
        }) => cmd_downgrade(&source, &destination, json_format(compact)),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: tlfconv upgrade <SOURCE> <DEST>".yellow());
            println!("       tlfconv --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_upgrade(
    source: &Path,
    destination: &Path,
    numeric_list_bounds: bool,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = UpgradeOptions::new().with_numeric_list_bounds(numeric_list_bounds);
    let doc = upgrade_file_with_options(source, &options)?;

    let json = render::to_json(&doc, format)?;
    fs::write(destination, &json)?;
    log::debug!("Wrote {} bytes", json.len());

    println!(
        "{} {} items to {}",
        "Upgraded".green(),
        doc.item_count(),
        doc.version
    );
    println!("{} {}", "Saved to".green(), destination.display());
    Ok(())
}

fn cmd_downgrade(
    source: &Path,
    destination: &Path,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let legacy = downgrade_file(source)?;

    let json = render::to_json(&legacy, format)?;
    fs::write(destination, &json)?;
    log::debug!("Wrote {} bytes", json.len());

    println!("{} to {}", "Downgraded".green(), legacy.version);
    println!("{} {}", "Saved to".green(), destination.display());
    Ok(())
}

fn cmd_info(input: &Path, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(Error::MissingInputFile(input.to_path_buf()).into());
    }
    let info = inspect_path(input)?;

    if as_json {
        let summary = serde_json::json!({
            "file": input.display().to_string(),
            "generation": info.generation.to_string(),
            "version": info.version,
            "title": info.title,
            "paper-type": info.paper_type,
            "shapes": info.shape_count,
            "upgradable": info.is_upgradable(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Layout Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Schema".bold(), info.generation);
    println!("{}: {}", "Version".bold(), info.version);
    if !info.title.is_empty() {
        println!("{}: {}", "Title".bold(), info.title);
    }
    println!("{}: {}", "Paper".bold(), info.paper_type);
    println!("{}: {}", "Shapes".bold(), info.shape_count);
    println!(
        "{}: {}",
        "Upgradable".bold(),
        if info.is_upgradable() { "Yes" } else { "No" }
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tlfconv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Report layout schema converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/tlfconv".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LEGACY: &str = r#"{
        "version": "0.8.2",
        "config": {"title": "CLI", "page": {"paper-type": "A4", "orientation": "portrait",
            "margin-top": "10", "margin-right": "10", "margin-bottom": "10", "margin-left": "10"}},
        "svg": "<svg><g class=\"canvas\"><!--SHAPE{\"type\":\"s-list\",\"id\":\"l\",\"header\":{},\"detail\":{\"height\":\"20\",\"translate\":{\"x\":\"0\",\"y\":\"0\"}},\"page-footer\":{},\"footer\":{}}SHAPE--><g class=\"s-list\" x-id=\"l\" x=\"5\" y=\"6\" width=\"100\" height=\"50\"/></g></svg>"
    }"#;

    #[test]
    fn test_upgrade_writes_numeric_bounds() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("legacy.tlf");
        let destination = dir.path().join("current.tlf");
        fs::write(&source, LEGACY).unwrap();

        cmd_upgrade(&source, &destination, true, JsonFormat::Pretty).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
        assert_eq!(written["version"], "0.9.0");
        assert_eq!(written["items"][0]["x"], 5.0);
        assert_eq!(written["items"][0]["height"], 50.0);
    }

    #[test]
    fn test_upgrade_text_bounds() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("legacy.tlf");
        let destination = dir.path().join("current.tlf");
        fs::write(&source, LEGACY).unwrap();

        cmd_upgrade(&source, &destination, false, JsonFormat::Compact).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
        assert_eq!(written["items"][0]["x"], "5");
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("out.tlf");

        let err = cmd_upgrade(
            &dir.path().join("missing.tlf"),
            &destination,
            true,
            JsonFormat::Pretty,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("No such file - "));
        assert!(!destination.exists());
    }

    #[test]
    fn test_unupgradable_version_writes_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("old.tlf");
        let destination = dir.path().join("out.tlf");
        fs::write(&source, LEGACY.replace("0.8.2", "0.7.9")).unwrap();

        let err = cmd_upgrade(&source, &destination, true, JsonFormat::Pretty).unwrap_err();
        assert_eq!(err.to_string(), "Unupgradable version: 0.7.9");
        assert!(!destination.exists());
    }
}
