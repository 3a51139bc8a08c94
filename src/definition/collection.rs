//! Grouping of definitions by domain and kind.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::{Definition, DefinitionKind, ParseDefinition};
use crate::error::Result;
use crate::handlers::HandlerMap;

/// Commands and queries of one domain, each sorted by command class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainDefinitions {
    pub commands: Vec<Definition>,
    pub queries: Vec<Definition>,
}

impl DomainDefinitions {
    pub fn len(&self) -> usize {
        self.commands.len() + self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.queries.is_empty()
    }

    fn bucket_mut(&mut self, kind: DefinitionKind) -> &mut Vec<Definition> {
        match kind {
            DefinitionKind::Command => &mut self.commands,
            DefinitionKind::Query => &mut self.queries,
        }
    }

    /// Queries first, then commands.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.queries.iter().chain(self.commands.iter())
    }
}

/// Definitions keyed by domain name in ascending order. The empty string is
/// the bucket for classes outside any domain.
pub type DefinitionsByDomain = BTreeMap<String, DomainDefinitions>;

/// Parses a handler map into grouped definitions.
pub struct DefinitionCollection<P> {
    parser: P,
}

impl<P: ParseDefinition> DefinitionCollection<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Parses every pair and groups the results. The first parse error aborts.
    pub fn get_definitions_by_domain(&self, handlers: &HandlerMap) -> Result<DefinitionsByDomain> {
        let mut by_domain = DefinitionsByDomain::new();

        for (handler_class, command_class) in handlers.iter() {
            let definition = self.parser.parse_definition(handler_class, command_class)?;
            let bucket = by_domain
                .entry(definition.domain.clone())
                .or_default()
                .bucket_mut(definition.kind);
            bucket.push(definition);
            bucket.sort_by(|a, b| a.command_class.cmp(&b.command_class));
        }

        info!(
            "Collected {} definitions in {} domains",
            by_domain.values().map(DomainDefinitions::len).sum::<usize>(),
            by_domain.len()
        );
        Ok(by_domain)
    }

    /// Flat list, domain by domain, queries before commands.
    pub fn get_definitions(&self, handlers: &HandlerMap) -> Result<Vec<Definition>> {
        let by_domain = self.get_definitions_by_domain(handlers)?;
        Ok(by_domain
            .into_values()
            .flat_map(|domain| domain.queries.into_iter().chain(domain.commands))
            .collect())
    }
}
