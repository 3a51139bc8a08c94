//! Error types for cqrs-doc-tools.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for documentation generation.
#[derive(Error, Debug)]
pub enum DocToolsError {
    /// A handler, command, or method name did not resolve to a known type.
    #[error("Type resolution error: {0}")]
    TypeResolution(String),

    /// Configuration errors (invalid config file, bad destination, missing version, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors while deleting, creating, or writing documentation files.
    #[error("IO error: {0}")]
    Io(String),

    /// Source files that could not be read or scanned.
    #[error("Source error: {0}")]
    Source(String),

    /// Template rendering errors.
    #[error("Template error: {0}")]
    Template(String),
}

impl DocToolsError {
    /// Creates a type resolution error for the given identifier.
    pub fn type_resolution(msg: impl Into<String>) -> Self {
        Self::TypeResolution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an IO error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates a source scanning error with the given message.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Creates a template error with the given message.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::TypeResolution(_) => "Type Resolution Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "IO Error",
            Self::Source(_) => "Source Error",
            Self::Template(_) => "Template Error",
        }
    }
}

/// Result type alias using DocToolsError.
pub type Result<T> = std::result::Result<T, DocToolsError>;
