//! Handler → command map.
//!
//! Built either from a JSON manifest or by discovering attributed handler
//! classes in the source index.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::definition::HANDLER_METHOD_NAME;
use crate::error::{DocToolsError, Result};
use crate::source::{SourceIndex, TypeIntrospector, TypeKind};

/// Attributes that register a class on the command or query bus.
pub const HANDLER_ATTRIBUTES: &[&str] = &["AsCommandHandler", "AsQueryHandler"];

/// Ordered mapping of handler class to the command or query class it handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerMap(IndexMap<String, String>);

impl HandlerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handler_class: impl Into<String>, command_class: impl Into<String>) {
        self.0.insert(handler_class.into(), command_class.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(handler_class, command_class)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(h, c)| (h.as_str(), c.as_str()))
    }

    /// Loads a manifest of the form `{"Handler\\Class": "Command\\Class"}`.
    pub fn load_manifest(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DocToolsError::config(format!(
                "Failed to read handler manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        let map = Self::from_json(&content).map_err(|e| {
            DocToolsError::config(format!("{} ({})", e, path.display()))
        })?;
        info!("Loaded {} handlers from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| DocToolsError::config(format!("Invalid handler manifest: {e}")))
    }

    /// Pairs every attributed handler class with the type of the first
    /// parameter of its `handle` method, in index order.
    pub fn discover(index: &SourceIndex) -> Self {
        let mut map = Self::new();

        for ty in index.types() {
            if ty.kind != TypeKind::Class
                || !HANDLER_ATTRIBUTES.iter().any(|a| ty.has_attribute(a))
            {
                continue;
            }

            let command = index
                .find_method(ty, HANDLER_METHOD_NAME)
                .and_then(|(_, method)| method.parameters.first())
                .and_then(|param| param.declared_type.clone());

            match command {
                Some(command) => {
                    debug!("Discovered handler {} for {}", ty.name, command);
                    map.insert(ty.name.clone(), command);
                }
                None => warn!(
                    "Handler {} has no typed {}() parameter, skipping",
                    ty.name, HANDLER_METHOD_NAME
                ),
            }
        }

        info!("Discovered {} handlers", map.len());
        map
    }
}

impl<H: Into<String>, C: Into<String>> FromIterator<(H, C)> for HandlerMap {
    fn from_iter<I: IntoIterator<Item = (H, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(h, c)| (h.into(), c.into()))
                .collect(),
        )
    }
}
