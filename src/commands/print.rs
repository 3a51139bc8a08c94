//! `cqrs-docs print`: writes the markdown reference tree.

use std::path::Path;

use tracing::info;

use super::Project;
use crate::config::DocsConfig;
use crate::error::Result;
use crate::printer::{DefinitionPrinter, MarkdownTemplates, PrintReport};

/// Result of a print run.
#[derive(Debug, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed(PrintReport),
    /// The user declined to wipe the existing destination.
    Cancelled,
}

/// Prints the documentation of `project` into `destination`.
///
/// Configuration and parse errors surface before anything is asked or
/// written. With `force` and an existing destination, `confirm` is asked
/// next; a refusal leaves the filesystem untouched.
pub fn run(
    project: &Project,
    docs: &DocsConfig,
    destination: &Path,
    force: bool,
    confirm: impl FnOnce(&Path) -> Result<bool>,
) -> Result<PrintOutcome> {
    let printer = DefinitionPrinter::new(Box::new(MarkdownTemplates::new()?), docs.layout.layout())
        .with_version(docs.version.clone());
    printer.check_version()?;

    let by_domain = project
        .collection()
        .get_definitions_by_domain(&project.handlers)?;

    if force && destination.exists() && !confirm(destination)? {
        info!("Print cancelled");
        return Ok(PrintOutcome::Cancelled);
    }

    let report = printer.print_definitions_documentation(&by_domain, destination, force)?;

    Ok(PrintOutcome::Printed(report))
}
