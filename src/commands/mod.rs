//! Subcommand implementations for cqrs-docs.
//!
//! Both subcommands work on a [`Project`]: the scanned sources, the domain
//! classifier and the handler map.

pub mod list;
pub mod print;

use tracing::info;

use crate::config::SourcesConfig;
use crate::definition::{DefinitionCollection, DefinitionParser};
use crate::domain::RegexDomainParser;
use crate::error::{DocToolsError, Result};
use crate::handlers::HandlerMap;
use crate::source::SourceIndex;

/// Everything needed to parse definitions.
pub struct Project {
    pub index: SourceIndex,
    pub domain_parser: RegexDomainParser,
    pub handlers: HandlerMap,
}

impl Project {
    /// Scans the configured source roots and builds the handler map, from the
    /// manifest if one is configured, otherwise by discovery.
    pub fn load(sources: &SourcesConfig) -> Result<Self> {
        if sources.roots.is_empty() {
            return Err(DocToolsError::config(
                "No source directories configured. Pass --source or set sources.roots",
            ));
        }

        let domain_parser = RegexDomainParser::from_setting(&sources.domain_pattern)?;
        let index = SourceIndex::scan_dirs(&sources.roots)?;

        let handlers = match &sources.manifest {
            Some(manifest) => HandlerMap::load_manifest(manifest)?,
            None => HandlerMap::discover(&index),
        };
        info!("{} handlers to document", handlers.len());

        Ok(Self {
            index,
            domain_parser,
            handlers,
        })
    }

    pub fn collection(&self) -> DefinitionCollection<DefinitionParser<'_>> {
        DefinitionCollection::new(DefinitionParser::new(&self.index, &self.domain_parser))
    }
}
