//! `cqrs-docs list`: prints every definition to stdout.

use std::fmt::Write as _;
use std::io::Write;

use super::Project;
use crate::definition::Definition;
use crate::error::{DocToolsError, Result};

/// Formats definitions as a numbered listing.
pub fn format_listing(definitions: &[Definition]) -> String {
    let mut out = String::new();

    for (i, definition) in definitions.iter().enumerate() {
        let interfaces = if definition.handler_interfaces.is_empty() {
            String::new()
        } else {
            format!(" (Implements: {})", definition.handler_interfaces.join(", "))
        };
        let return_type = if definition.return_type.is_empty() {
            "not defined"
        } else {
            definition.return_type.as_str()
        };

        let _ = writeln!(out, "{}.", i + 1);
        let _ = writeln!(out, "{}: {}", definition.kind, definition.command_class);
        let _ = writeln!(out, "Handler: {}.{}", definition.handler_class, interfaces);
        let _ = writeln!(out, "Return type: {}", return_type);
        let _ = writeln!(out, "{}", definition.description);
        let _ = writeln!(out);
    }

    out
}

/// Parses all handlers of the project and writes the listing to `out`.
pub fn run(project: &Project, out: &mut impl Write) -> Result<()> {
    let definitions = project.collection().get_definitions(&project.handlers)?;
    out.write_all(format_listing(&definitions).as_bytes())
        .map_err(|e| DocToolsError::io(format!("Failed to write listing: {e}")))
}
