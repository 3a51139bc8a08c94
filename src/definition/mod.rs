//! Command and query definitions.
//!
//! A [`Definition`] is the documentation record of one handler/command pair.
//! The parser builds it from type descriptors and the collection groups many
//! of them by domain.

mod collection;
pub mod docblock;
mod parser;

pub use collection::{DefinitionCollection, DefinitionsByDomain, DomainDefinitions};
pub use parser::{DefinitionParser, ParseDefinition, HANDLER_METHOD_NAME};

use std::fmt;

use serde::Serialize;

/// Whether a definition describes a command or a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Command,
    Query,
}

impl DefinitionKind {
    /// Commands live in a `\Command\` namespace segment; everything else is a query.
    pub fn of_class(command_class: &str) -> Self {
        if command_class.contains(r"\Command\") {
            Self::Command
        } else {
            Self::Query
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "Command"),
            Self::Query => write!(f, "Query"),
        }
    }
}

/// Documentation record of a command or query and its handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// Business domain; empty when the class is outside any domain namespace.
    pub domain: String,
    pub handler_class: String,
    pub command_class: String,
    /// Rendered constructor parameters, e.g. `?string $address2 = NULL`.
    pub constructor_parameters: Vec<String>,
    pub description: String,
    pub return_type: String,
    pub handler_interfaces: Vec<String>,
    pub simple_class_name: String,
    pub slug: String,
}
