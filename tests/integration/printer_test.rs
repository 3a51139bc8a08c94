//! Markdown output against the PHP fixtures.

use std::fs;
use std::path::Path;

use cqrs_doc_tools::definition::{DefinitionCollection, DefinitionParser, DefinitionsByDomain};
use cqrs_doc_tools::error::DocToolsError;
use cqrs_doc_tools::handlers::HandlerMap;
use cqrs_doc_tools::printer::{DefinitionPrinter, LayoutKind, MarkdownTemplates};
use tempfile::TempDir;

use super::{fixture_index, test_domain_parser};

fn by_domain() -> DefinitionsByDomain {
    let index = fixture_index();
    let domains = test_domain_parser();
    DefinitionCollection::new(DefinitionParser::new(&index, &domains))
        .get_definitions_by_domain(&HandlerMap::discover(&index))
        .unwrap()
}

fn printer(layout: LayoutKind, version: Option<&str>) -> DefinitionPrinter {
    DefinitionPrinter::new(Box::new(MarkdownTemplates::new().unwrap()), layout.layout())
        .with_version(version.map(str::to_string))
}

fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[test]
fn test_flat_layout_files() {
    let dir = TempDir::new().unwrap();
    let report = printer(LayoutKind::Flat, None)
        .print_definitions_documentation(&by_domain(), dir.path(), false)
        .unwrap();

    assert_eq!(report.written.len(), 3);
    assert_eq!(
        relative_files(dir.path()),
        vec!["_index.md", "manufacturer.md", "tax.md"]
    );

    let tax = fs::read_to_string(dir.path().join("tax.md")).unwrap();
    assert!(tax.starts_with("---\ntitle: Tax\n"));
    assert!(tax.contains("## Commands"));
    assert!(tax.contains("### AddTaxCommand"));
    assert!(tax.contains("## Queries"));
    assert!(tax.contains("### GetTaxForEditing"));
    assert!(tax.contains(r"`Tests\Resources\Domain\Tax\ValueObject\TaxId`"));
    assert!(tax.contains("float $rate"));
    assert!(tax.find("### AddTaxCommand").unwrap() < tax.find("### EditTaxCommand").unwrap());

    let index = fs::read_to_string(dir.path().join("_index.md")).unwrap();
    assert!(index.contains("[Manufacturer](manufacturer.md)"));
    assert!(index.contains("[Tax](tax.md)"));
}

#[test]
fn test_nested_layout_files() {
    let dir = TempDir::new().unwrap();
    printer(LayoutKind::Nested, Some("9.0"))
        .print_definitions_documentation(&by_domain(), dir.path(), false)
        .unwrap();

    assert_eq!(
        relative_files(dir.path()),
        vec![
            "_index.md",
            "manufacturer/_partials/add-manufacturer-command.md",
            "manufacturer/_partials/edit-manufacturer-command.md",
            "manufacturer/_partials/get-manufacturer-for-editing.md",
            "manufacturer/index.md",
            "tax/_partials/add-tax-command.md",
            "tax/_partials/edit-tax-command.md",
            "tax/_partials/get-tax-for-editing.md",
            "tax/index.md",
        ]
    );

    let domain_index = fs::read_to_string(dir.path().join("tax/index.md")).unwrap();
    assert!(domain_index.contains("version: \"9.0\""));
    assert!(domain_index.contains(r#"{{% include file="_partials/add-tax-command.md" %}}"#));

    let partial =
        fs::read_to_string(dir.path().join("manufacturer/_partials/add-manufacturer-command.md"))
            .unwrap();
    assert!(partial.starts_with("## AddManufacturerCommand"));
    assert!(partial.contains("| Return type | `ManufacturerId` |"));
    assert!(partial.contains("    string[] $localizedMetaKeywords,"));
}

#[test]
fn test_nested_layout_requires_version() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("docs");

    let err = printer(LayoutKind::Nested, None)
        .print_definitions_documentation(&by_domain(), &destination, false)
        .unwrap_err();

    assert!(matches!(err, DocToolsError::Config(_)));
    assert!(!destination.exists());
}

#[test]
fn test_second_run_keeps_existing_files() {
    let dir = TempDir::new().unwrap();
    let printer = printer(LayoutKind::Flat, None);
    printer
        .print_definitions_documentation(&by_domain(), dir.path(), false)
        .unwrap();
    fs::write(dir.path().join("tax.md"), "edited by hand").unwrap();

    let report = printer
        .print_definitions_documentation(&by_domain(), dir.path(), false)
        .unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 3);
    assert_eq!(
        fs::read_to_string(dir.path().join("tax.md")).unwrap(),
        "edited by hand"
    );
}

#[test]
fn test_force_refresh_wipes_destination() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stale.md"), "old").unwrap();
    fs::write(dir.path().join("tax.md"), "edited by hand").unwrap();

    let report = printer(LayoutKind::Flat, None)
        .print_definitions_documentation(&by_domain(), dir.path(), true)
        .unwrap();

    assert_eq!(report.written.len(), 3);
    assert!(!dir.path().join("stale.md").exists());
    assert_ne!(
        fs::read_to_string(dir.path().join("tax.md")).unwrap(),
        "edited by hand"
    );
}
