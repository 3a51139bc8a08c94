//! Markdown documentation printer.
//!
//! Renders grouped definitions into a directory tree. Existing files are left
//! untouched unless a forced refresh wipes the destination first, so a second
//! run only fills in what is missing.

mod layout;
mod templates;
mod writer;

pub use layout::{FlatLayout, LayoutKind, NestedLayout, OutputLayout, INDEX_FILE_NAME};
pub use templates::{
    MarkdownTemplates, TemplateRenderer, DEFINITION_TEMPLATE, DOMAIN_INDEX_TEMPLATE,
    DOMAIN_LIST_TEMPLATE, INDEX_TEMPLATE,
};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::casing::to_kebab_case;
use crate::definition::{Definition, DefinitionsByDomain, DomainDefinitions};
use crate::error::{DocToolsError, Result};

/// Slug of the bucket for classes outside any domain. The leading underscore
/// keeps it apart from every kebab-cased domain name.
pub const UNCLASSIFIED_DOMAIN_SLUG: &str = "_unclassified";

/// Files touched by one printer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintReport {
    pub written: Vec<PathBuf>,
    /// Files that already existed and were kept.
    pub skipped: Vec<PathBuf>,
}

/// Writes documentation files for grouped definitions.
pub struct DefinitionPrinter {
    renderer: Box<dyn TemplateRenderer>,
    layout: Box<dyn OutputLayout>,
    version: Option<String>,
}

impl DefinitionPrinter {
    pub fn new(renderer: Box<dyn TemplateRenderer>, layout: Box<dyn OutputLayout>) -> Self {
        Self {
            renderer,
            layout,
            version: None,
        }
    }

    /// Sets the documentation version stamped into generated pages.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version.filter(|v| !v.trim().is_empty());
        self
    }

    /// Fails when the layout needs a documentation version and none is set.
    pub fn check_version(&self) -> Result<()> {
        if self.layout.requires_version() && self.version.is_none() {
            return Err(DocToolsError::config(
                "A documentation version is required for the nested layout (docs.version or --docs-version)",
            ));
        }
        Ok(())
    }

    /// Renders every domain page, definition page and the top-level index.
    ///
    /// With `force_refresh` the destination is deleted first and every file is
    /// rewritten. Otherwise files that already exist are skipped.
    pub fn print_definitions_documentation(
        &self,
        by_domain: &DefinitionsByDomain,
        destination_dir: &Path,
        force_refresh: bool,
    ) -> Result<PrintReport> {
        self.check_version()?;
        check_domain_slugs(by_domain)?;

        if force_refresh {
            info!("Removing {}", destination_dir.display());
            writer::remove_dir_all(destination_dir)?;
        }

        let mut report = PrintReport::default();

        for (domain, definitions) in by_domain {
            if definitions.is_empty() {
                continue;
            }
            let domain_slug = domain_slug(domain);

            let domain_file = self.layout.domain_file(destination_dir, &domain_slug);
            self.emit(&mut report, &domain_file, force_refresh, || {
                self.renderer.render(
                    self.layout.domain_template(),
                    &json!({
                        "domain": domain,
                        "slug": domain_slug,
                        "definitions_by_type": definitions,
                        "version": self.version,
                    }),
                )
            })?;

            self.print_definition_pages(
                &mut report,
                domain,
                &domain_slug,
                definitions,
                destination_dir,
                force_refresh,
            )?;
        }

        let index_file = self.layout.index_file(destination_dir);
        self.emit(&mut report, &index_file, force_refresh, || {
            self.renderer
                .render(INDEX_TEMPLATE, &self.index_context(by_domain))
        })?;

        info!(
            "Wrote {} files, skipped {} existing files in {}",
            report.written.len(),
            report.skipped.len(),
            destination_dir.display()
        );
        Ok(report)
    }

    fn print_definition_pages(
        &self,
        report: &mut PrintReport,
        domain: &str,
        domain_slug: &str,
        definitions: &DomainDefinitions,
        destination_dir: &Path,
        force_refresh: bool,
    ) -> Result<()> {
        let Some(template) = self.layout.definition_template() else {
            return Ok(());
        };

        for definition in definitions.commands.iter().chain(&definitions.queries) {
            let Some(path) = self
                .layout
                .definition_file(destination_dir, domain_slug, definition)
            else {
                continue;
            };
            self.emit(report, &path, force_refresh, || {
                self.renderer
                    .render(template, &self.definition_context(domain, definition))
            })?;
        }

        Ok(())
    }

    /// Renders and writes `path`, unless it exists and no refresh was forced.
    fn emit(
        &self,
        report: &mut PrintReport,
        path: &Path,
        force_refresh: bool,
        render: impl FnOnce() -> Result<String>,
    ) -> Result<()> {
        if !force_refresh && path.exists() {
            debug!("Keeping existing {}", path.display());
            report.skipped.push(path.to_path_buf());
            return Ok(());
        }

        let content = render()?;
        writer::write_atomic(path, &content)?;
        debug!("Wrote {}", path.display());
        report.written.push(path.to_path_buf());
        Ok(())
    }

    fn definition_context(&self, domain: &str, definition: &Definition) -> Value {
        json!({
            "definition": definition,
            "domain": domain,
            "version": self.version,
        })
    }

    fn index_context(&self, by_domain: &DefinitionsByDomain) -> Value {
        let domains: Vec<Value> = by_domain
            .iter()
            .filter(|(_, definitions)| !definitions.is_empty())
            .map(|(domain, definitions)| {
                let slug = domain_slug(domain);
                json!({
                    "name": domain,
                    "link": self.layout.domain_link(&slug),
                    "slug": slug,
                    "commands": definitions.commands.len(),
                    "queries": definitions.queries.len(),
                })
            })
            .collect();

        json!({
            "domains": domains,
            "version": self.version,
        })
    }
}

/// Fails when two printed domains map to the same slug.
fn check_domain_slugs(by_domain: &DefinitionsByDomain) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (domain, definitions) in by_domain {
        if definitions.is_empty() {
            continue;
        }
        if let Some(other) = seen.insert(domain_slug(domain), domain) {
            return Err(DocToolsError::config(format!(
                "Domains \"{}\" and \"{}\" share the slug \"{}\"",
                other,
                domain,
                domain_slug(domain)
            )));
        }
    }
    Ok(())
}

/// Kebab-case slug of a domain; the empty domain gets a fixed name.
pub fn domain_slug(domain: &str) -> String {
    if domain.is_empty() {
        UNCLASSIFIED_DOMAIN_SLUG.to_string()
    } else {
        to_kebab_case(domain)
    }
}
