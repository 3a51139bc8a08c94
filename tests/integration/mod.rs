//! Integration tests for cqrs-doc-tools.
//!
//! The fixtures mirror a small `Tests\Resources\Domain` tree with three
//! domains: Tax (strong typing), Manufacturer (PHPDoc typing) and Supplier
//! (handlers without interfaces or attributes).

pub mod cli_test;
pub mod collection_test;
pub mod parser_test;
pub mod printer_test;

use std::path::PathBuf;

use cqrs_doc_tools::domain::RegexDomainParser;
use cqrs_doc_tools::source::SourceIndex;

/// Root of the PHP fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Index over every fixture file.
pub fn fixture_index() -> SourceIndex {
    SourceIndex::scan_dirs(&[fixtures_dir()]).expect("fixtures scan cleanly")
}

pub fn test_domain_parser() -> RegexDomainParser {
    RegexDomainParser::test_fixtures()
}

pub const NS: &str = r"Tests\Resources\Domain";

/// Fully qualified fixture class name, e.g. `fqcn(r"Tax\Command\AddTaxCommand")`.
pub fn fqcn(relative: &str) -> String {
    format!(r"{NS}\{relative}")
}
