//! cqrs-doc-tools - Markdown reference docs for CQRS commands and queries.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod casing;
pub mod cli;
pub mod commands;
pub mod config;
pub mod definition;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod printer;
pub mod source;
