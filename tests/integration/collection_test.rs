//! Handler discovery and grouping against the PHP fixtures.

use cqrs_doc_tools::definition::{DefinitionCollection, DefinitionParser};
use cqrs_doc_tools::handlers::HandlerMap;
use pretty_assertions::assert_eq;

use super::{fixture_index, fqcn, test_domain_parser};

#[test]
fn test_discovery_finds_attributed_handlers() {
    let index = fixture_index();
    let handlers = HandlerMap::discover(&index);

    // Supplier handlers carry no handler attribute.
    assert_eq!(handlers.len(), 6);
    assert!(handlers
        .iter()
        .all(|(handler, _)| !handler.contains(r"\Supplier\")));

    let pairs: Vec<(&str, &str)> = handlers.iter().collect();
    assert!(pairs.contains(&(
        fqcn(r"Tax\QueryHandler\GetTaxForEditingHandler").as_str(),
        fqcn(r"Tax\Query\GetTaxForEditing").as_str(),
    )));
}

#[test]
fn test_definitions_grouped_by_domain() {
    let index = fixture_index();
    let domains = test_domain_parser();
    let collection = DefinitionCollection::new(DefinitionParser::new(&index, &domains));

    let by_domain = collection
        .get_definitions_by_domain(&HandlerMap::discover(&index))
        .unwrap();

    assert_eq!(
        by_domain.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Manufacturer", "Tax"]
    );

    let tax = &by_domain["Tax"];
    let commands: Vec<&str> = tax
        .commands
        .iter()
        .map(|d| d.simple_class_name.as_str())
        .collect();
    assert_eq!(commands, vec!["AddTaxCommand", "EditTaxCommand"]);
    assert_eq!(tax.queries.len(), 1);
    assert_eq!(tax.queries[0].simple_class_name, "GetTaxForEditing");
}

#[test]
fn test_flat_listing_puts_queries_first() {
    let index = fixture_index();
    let domains = test_domain_parser();
    let collection = DefinitionCollection::new(DefinitionParser::new(&index, &domains));

    let names: Vec<String> = collection
        .get_definitions(&HandlerMap::discover(&index))
        .unwrap()
        .into_iter()
        .map(|d| d.simple_class_name)
        .collect();

    assert_eq!(
        names,
        vec![
            "GetManufacturerForEditing",
            "AddManufacturerCommand",
            "EditManufacturerCommand",
            "GetTaxForEditing",
            "AddTaxCommand",
            "EditTaxCommand",
        ]
    );
}

#[test]
fn test_manifest_covers_undiscovered_handlers() {
    let index = fixture_index();
    let domains = test_domain_parser();
    let collection = DefinitionCollection::new(DefinitionParser::new(&index, &domains));

    let manifest = format!(
        r#"{{"{}": "{}"}}"#,
        fqcn(r"Supplier\CommandHandler\AddSupplierHandler").replace('\\', r"\\"),
        fqcn(r"Supplier\Command\AddSupplierCommand").replace('\\', r"\\"),
    );
    let handlers = HandlerMap::from_json(&manifest).unwrap();

    let definitions = collection.get_definitions(&handlers).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].domain, "Supplier");
    assert_eq!(definitions[0].return_type, "void");
    assert!(definitions[0].handler_interfaces.is_empty());
}
