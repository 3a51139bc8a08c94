//! Output layouts of the documentation tree.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::templates::{DEFINITION_TEMPLATE, DOMAIN_INDEX_TEMPLATE, DOMAIN_LIST_TEMPLATE};
use crate::definition::Definition;
use crate::error::DocToolsError;

/// Name of the top-level index file, shared by every layout.
pub const INDEX_FILE_NAME: &str = "_index.md";

/// Where documentation files go and which templates render them.
pub trait OutputLayout {
    /// Whether pages of this layout embed the documentation version.
    fn requires_version(&self) -> bool;

    /// Summary page of one domain.
    fn domain_file(&self, destination: &Path, domain_slug: &str) -> PathBuf;

    fn domain_template(&self) -> &'static str;

    /// Link to the domain page, relative to the index.
    fn domain_link(&self, domain_slug: &str) -> String;

    /// Detail page of one definition, if the layout has them.
    fn definition_file(
        &self,
        _destination: &Path,
        _domain_slug: &str,
        _definition: &Definition,
    ) -> Option<PathBuf> {
        None
    }

    fn definition_template(&self) -> Option<&'static str> {
        None
    }

    fn index_file(&self, destination: &Path) -> PathBuf {
        destination.join(INDEX_FILE_NAME)
    }
}

/// `{dest}/{domain}.md` and `{dest}/_index.md`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatLayout;

impl OutputLayout for FlatLayout {
    fn requires_version(&self) -> bool {
        false
    }

    fn domain_file(&self, destination: &Path, domain_slug: &str) -> PathBuf {
        destination.join(format!("{domain_slug}.md"))
    }

    fn domain_template(&self) -> &'static str {
        DOMAIN_LIST_TEMPLATE
    }

    fn domain_link(&self, domain_slug: &str) -> String {
        format!("{domain_slug}.md")
    }
}

/// `{dest}/{domain}/index.md` with one `_partials/{slug}.md` per definition.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedLayout;

impl NestedLayout {
    const DOMAIN_FILE_NAME: &'static str = "index.md";
    const PARTIALS_DIR: &'static str = "_partials";
}

impl OutputLayout for NestedLayout {
    fn requires_version(&self) -> bool {
        true
    }

    fn domain_file(&self, destination: &Path, domain_slug: &str) -> PathBuf {
        destination.join(domain_slug).join(Self::DOMAIN_FILE_NAME)
    }

    fn domain_template(&self) -> &'static str {
        DOMAIN_INDEX_TEMPLATE
    }

    fn domain_link(&self, domain_slug: &str) -> String {
        format!("{domain_slug}/")
    }

    fn definition_file(
        &self,
        destination: &Path,
        domain_slug: &str,
        definition: &Definition,
    ) -> Option<PathBuf> {
        Some(
            destination
                .join(domain_slug)
                .join(Self::PARTIALS_DIR)
                .join(format!("{}.md", definition.slug)),
        )
    }

    fn definition_template(&self) -> Option<&'static str> {
        Some(DEFINITION_TEMPLATE)
    }
}

/// Configured layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Flat,
    #[default]
    Nested,
}

impl LayoutKind {
    pub fn layout(self) -> Box<dyn OutputLayout> {
        match self {
            Self::Flat => Box::new(FlatLayout),
            Self::Nested => Box::new(NestedLayout),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Nested => write!(f, "nested"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = DocToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "nested" => Ok(Self::Nested),
            other => Err(DocToolsError::config(format!(
                "Unknown layout '{}', expected 'flat' or 'nested'",
                other
            ))),
        }
    }
}
