//! Configuration management for cqrs-doc-tools.
//!
//! Handles loading configuration from a TOML file: where the documentation
//! project lives, which layout and version to print, and where the PHP
//! sources and handler manifest are.

use crate::error::{DocToolsError, Result};
use crate::printer::LayoutKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Documentation project settings.
    #[serde(default)]
    pub docs: DocsConfig,

    /// Source scanning settings.
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Documentation project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Root of the documentation project, used when `--dir` is not given.
    pub path: Option<PathBuf>,

    /// Folder of the CQRS reference inside the documentation project.
    #[serde(default = "default_cqrs_folder")]
    pub cqrs_folder: String,

    /// Output layout: "nested" or "flat".
    #[serde(default)]
    pub layout: LayoutKind,

    /// Documentation version stamped into generated pages.
    pub version: Option<String>,
}

fn default_cqrs_folder() -> String {
    "src/content/reference/domain/references".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: None,
            cqrs_folder: default_cqrs_folder(),
            layout: LayoutKind::default(),
            version: None,
        }
    }
}

impl DocsConfig {
    /// Destination derived from the documentation project path, if configured.
    pub fn destination(&self) -> Option<PathBuf> {
        self.path
            .as_ref()
            .map(|root| root.join(self.cqrs_folder.trim_start_matches('/')))
    }
}

/// Source scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Directories scanned for `.php` files.
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Domain pattern: "core", "test", or a regex with one capture group.
    #[serde(default = "default_domain_pattern")]
    pub domain_pattern: String,

    /// JSON handler manifest used instead of attribute discovery.
    pub manifest: Option<PathBuf>,
}

fn default_domain_pattern() -> String {
    "core".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            domain_pattern: default_domain_pattern(),
            manifest: None,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cqrs-doc-tools")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DocToolsError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DocToolsError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
