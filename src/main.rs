//! cqrs-docs - Documents the commands and queries of a CQRS command bus.

use std::path::Path;

use cqrs_doc_tools::cli::{self, Cli, Command};
use cqrs_doc_tools::commands::print::PrintOutcome;
use cqrs_doc_tools::commands::{list, print, Project};
use cqrs_doc_tools::config::Config;
use cqrs_doc_tools::error::{DocToolsError, Result};
use cqrs_doc_tools::logging;
use dialoguer::Confirm;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

/// Runs the selected subcommand. Returns `false` when the user cancelled.
fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_to(&mut config)?;

    match &cli.command {
        Command::List => {
            let project = Project::load(&config.sources)?;
            list::run(&project, &mut std::io::stdout().lock())?;
            Ok(true)
        }
        Command::Print(args) => {
            let destination = cli::resolve_destination(args, &config)?;
            let project = Project::load(&config.sources)?;

            let skip_prompt = args.yes;
            let outcome = print::run(
                &project,
                &config.docs,
                &destination,
                args.force,
                |dir| if skip_prompt { Ok(true) } else { confirm_wipe(dir) },
            );
            match outcome? {
                PrintOutcome::Cancelled => {
                    println!("Cancelled");
                    Ok(false)
                }
                PrintOutcome::Printed(report) => {
                    info!(
                        "{} files written, {} kept",
                        report.written.len(),
                        report.skipped.len()
                    );
                    println!("dumped commands & queries to {}", destination.display());
                    Ok(true)
                }
            }
        }
    }
}

fn confirm_wipe(dir: &Path) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "All data in directory \"{}\" will be lost. Proceed?",
            dir.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| DocToolsError::io(format!("Failed to read confirmation: {e}")))
}
