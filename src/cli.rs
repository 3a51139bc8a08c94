//! Command-line argument parsing for cqrs-docs.
//!
//! Uses clap to parse the `list` and `print` subcommands and the source
//! options they share.

use crate::config::Config;
use crate::error::{DocToolsError, Result};
use crate::printer::LayoutKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Documents the commands and queries of a CQRS command bus.
#[derive(Parser, Debug)]
#[command(name = "cqrs-docs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// PHP source directory to scan (repeatable, overrides sources.roots)
    #[arg(short = 's', long = "source", value_name = "DIR", global = true)]
    pub sources: Vec<PathBuf>,

    /// JSON handler manifest (overrides attribute discovery)
    #[arg(short = 'm', long, value_name = "PATH", global = true)]
    pub manifest: Option<PathBuf>,

    /// Domain pattern: "core", "test", or a regex with one capture group
    #[arg(long, value_name = "PATTERN", global = true)]
    pub domain_pattern: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists available CQRS commands and queries
    List,

    /// Prints available CQRS commands and queries to markdown files
    #[command(
        after_help = "Example: cqrs-docs print --dir=/path/to/doc_project/src/content/reference/domain/references"
    )]
    Print(PrintArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrintArgs {
    /// Destination directory (absolute); defaults to docs.path + docs.cqrs_folder
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Delete the destination first and rewrite every file
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Do not ask before deleting an existing destination
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output layout: "nested" or "flat" (overrides docs.layout)
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Documentation version stamped into pages (overrides docs.version)
    #[arg(long = "docs-version", value_name = "VERSION")]
    pub docs_version: Option<String>,
}

impl PrintArgs {
    /// Parses the --layout argument.
    pub fn parse_layout(&self) -> Result<Option<LayoutKind>> {
        self.layout.as_deref().map(str::parse).transpose()
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies command-line overrides to the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if !self.sources.is_empty() {
            config.sources.roots = self.sources.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.sources.manifest = Some(manifest.clone());
        }
        if let Some(pattern) = &self.domain_pattern {
            config.sources.domain_pattern = pattern.clone();
        }

        if let Command::Print(args) = &self.command {
            if let Some(layout) = args.parse_layout()? {
                config.docs.layout = layout;
            }
            if let Some(version) = &args.docs_version {
                config.docs.version = Some(version.clone());
            }
        }

        Ok(())
    }
}

/// Resolves and validates the destination directory of `print`.
///
/// `--dir` wins; otherwise the configured documentation project path joined
/// with the CQRS folder is used.
pub fn resolve_destination(args: &PrintArgs, config: &Config) -> Result<PathBuf> {
    let destination = match &args.dir {
        Some(dir) => dir.clone(),
        None => config.docs.destination().ok_or_else(|| {
            DocToolsError::config(
                "Option --dir is not provided. You must provide it or configure docs.path",
            )
        })?,
    };

    if !destination.is_absolute() {
        return Err(DocToolsError::config(format!(
            "\"{}\" is not an absolute path",
            destination.display()
        )));
    }
    if destination.exists() && !destination.is_dir() {
        return Err(DocToolsError::config(format!(
            "\"{}\" is not a directory",
            destination.display()
        )));
    }

    Ok(destination)
}
