//! Markdown templates and the renderer seam.

use minijinja::Environment;
use serde_json::Value;

use crate::casing::to_kebab_case;
use crate::error::{DocToolsError, Result};

/// Flat layout: one page per domain listing every definition.
pub const DOMAIN_LIST_TEMPLATE: &str = "cqrs-commands-list.md";
/// Nested layout: domain index page that includes the definition partials.
pub const DOMAIN_INDEX_TEMPLATE: &str = "cqrs-domain-index.md";
/// Nested layout: one partial per definition.
pub const DEFINITION_TEMPLATE: &str = "cqrs-definition.md";
/// Top-level `_index.md`.
pub const INDEX_TEMPLATE: &str = "cqrs-commands-index.md";

const TEMPLATES: &[(&str, &str)] = &[
    (
        DOMAIN_LIST_TEMPLATE,
        include_str!("templates/cqrs-commands-list.md"),
    ),
    (
        DOMAIN_INDEX_TEMPLATE,
        include_str!("templates/cqrs-domain-index.md"),
    ),
    (DEFINITION_TEMPLATE, include_str!("templates/cqrs-definition.md")),
    (INDEX_TEMPLATE, include_str!("templates/cqrs-commands-index.md")),
];

/// Renders a named template with a flat context.
pub trait TemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Renderer over the embedded markdown templates.
pub struct MarkdownTemplates {
    env: Environment<'static>,
}

impl MarkdownTemplates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("kebab", |value: String| to_kebab_case(&value));
        env.add_filter("md_cell", md_cell);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                DocToolsError::template(format!("Failed to load {}: {}", name, e))
            })?;
        }

        Ok(Self { env })
    }
}

/// Escapes pipes so a value stays in one GFM table cell, even inside a code span.
pub fn md_cell(value: String) -> String {
    value.replace('|', r"\|")
}

impl TemplateRenderer for MarkdownTemplates {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| DocToolsError::template(format!("Unknown template {}: {}", template, e)))?;

        tmpl.render(context)
            .map_err(|e| DocToolsError::template(format!("Failed to render {}: {}", template, e)))
    }
}
