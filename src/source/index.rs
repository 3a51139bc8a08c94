//! In-memory index of scanned type descriptors.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::descriptor::TypeDescriptor;
use super::scanner::scan_source;
use super::TypeIntrospector;
use crate::error::{DocToolsError, Result};

const PHP_EXTENSION: &str = "php";

/// Type descriptors keyed by fully-qualified name, in registration order.
#[derive(Debug, Default, Clone)]
pub struct SourceIndex {
    types: IndexMap<String, TypeDescriptor>,
}

impl SourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans every root and returns the combined index.
    pub fn scan_dirs<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let mut index = Self::new();
        for root in roots {
            index.scan_dir(root.as_ref())?;
        }
        info!("Indexed {} types", index.len());
        Ok(index)
    }

    /// Scans all `.php` files under `root`, in file name order.
    pub fn scan_dir(&mut self, root: &Path) -> Result<usize> {
        if !root.is_dir() {
            return Err(DocToolsError::source(format!(
                "Source root \"{}\" is not a directory",
                root.display()
            )));
        }

        let mut files = 0;
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                DocToolsError::source(format!("Failed to walk {}: {}", root.display(), e))
            })?;
            let is_php = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == PHP_EXTENSION);
            if is_php {
                self.scan_file(entry.path())?;
                files += 1;
            }
        }

        debug!("Scanned {} files under {}", files, root.display());
        Ok(files)
    }

    /// Scans a single file and registers its types.
    pub fn scan_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            DocToolsError::source(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let types = scan_source(&source, Some(path))?;
        debug!("{}: {} types", path.display(), types.len());

        for descriptor in types {
            self.register(descriptor);
        }
        Ok(())
    }

    /// Scans in-memory source text.
    pub fn add_source(&mut self, source: &str) -> Result<()> {
        for descriptor in scan_source(source, None)? {
            self.register(descriptor);
        }
        Ok(())
    }

    /// Registers a descriptor. The first registration of a name wins.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        if let Some(existing) = self.types.get(&descriptor.name) {
            warn!(
                "Duplicate declaration of {} in {}, keeping the one from {}",
                descriptor.name,
                location(&descriptor),
                location(existing)
            );
            return;
        }
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIntrospector for SourceIndex {
    fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name.trim_start_matches('\\'))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn location(descriptor: &TypeDescriptor) -> String {
    descriptor
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}
