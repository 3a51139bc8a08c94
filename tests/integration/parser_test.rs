//! Definition parsing against the PHP fixtures.

use cqrs_doc_tools::definition::{Definition, DefinitionKind, DefinitionParser, ParseDefinition};
use cqrs_doc_tools::error::DocToolsError;
use pretty_assertions::assert_eq;

use super::{fixture_index, fqcn, test_domain_parser};

const ADD_TAX: (&str, &str) = (r"Tax\CommandHandler\AddTaxHandler", r"Tax\Command\AddTaxCommand");
const EDIT_TAX: (&str, &str) = (r"Tax\CommandHandler\EditTaxHandler", r"Tax\Command\EditTaxCommand");
const GET_TAX: (&str, &str) = (
    r"Tax\QueryHandler\GetTaxForEditingHandler",
    r"Tax\Query\GetTaxForEditing",
);
const ADD_MANUFACTURER: (&str, &str) = (
    r"Manufacturer\CommandHandler\AddManufacturerHandler",
    r"Manufacturer\Command\AddManufacturerCommand",
);
const EDIT_MANUFACTURER: (&str, &str) = (
    r"Manufacturer\CommandHandler\EditManufacturerHandler",
    r"Manufacturer\Command\EditManufacturerCommand",
);
const GET_MANUFACTURER: (&str, &str) = (
    r"Manufacturer\QueryHandler\GetManufacturerForEditingHandler",
    r"Manufacturer\Query\GetManufacturerForEditing",
);
const ADD_SUPPLIER: (&str, &str) = (
    r"Supplier\CommandHandler\AddSupplierHandler",
    r"Supplier\Command\AddSupplierCommand",
);
const EDIT_SUPPLIER: (&str, &str) = (
    r"Supplier\CommandHandler\EditSupplierHandler",
    r"Supplier\Command\EditSupplierCommand",
);

const DOCUMENTED: [(&str, &str); 6] = [
    ADD_TAX,
    EDIT_TAX,
    GET_TAX,
    ADD_MANUFACTURER,
    EDIT_MANUFACTURER,
    GET_MANUFACTURER,
];

fn parse((handler, command): (&str, &str)) -> Definition {
    let index = fixture_index();
    let domains = test_domain_parser();
    DefinitionParser::new(&index, &domains)
        .parse_definition(&fqcn(handler), &fqcn(command))
        .unwrap()
}

#[test]
fn test_handler_interfaces() {
    for pair in DOCUMENTED {
        let definition = parse(pair);
        assert_eq!(
            definition.handler_interfaces,
            vec![format!("{}Interface", fqcn(pair.0))],
            "interfaces of {}",
            pair.0
        );
    }
}

#[test]
fn test_class_names() {
    for pair in DOCUMENTED {
        let definition = parse(pair);
        assert_eq!(definition.handler_class, fqcn(pair.0));
        assert_eq!(definition.command_class, fqcn(pair.1));
    }
}

#[test]
fn test_kind() {
    let expected = [
        (ADD_TAX, DefinitionKind::Command),
        (EDIT_TAX, DefinitionKind::Command),
        (GET_TAX, DefinitionKind::Query),
        (ADD_MANUFACTURER, DefinitionKind::Command),
        (EDIT_MANUFACTURER, DefinitionKind::Command),
        (GET_MANUFACTURER, DefinitionKind::Query),
    ];
    for (pair, kind) in expected {
        assert_eq!(parse(pair).kind, kind, "kind of {}", pair.1);
    }
}

#[test]
fn test_description() {
    let expected = [
        (EDIT_TAX, "Edits given tax with provided data (uses strong typing)"),
        (ADD_TAX, "Adds given tax with provided data (uses strong typing)"),
        (GET_TAX, "Gets tax for editing in Back Office (uses strong typing)"),
        (
            EDIT_MANUFACTURER,
            "Edits given manufacturer with provided data (uses PHPDoc typing)",
        ),
        (
            ADD_MANUFACTURER,
            "Adds given manufacturer with provided data (uses PHPDoc typing)",
        ),
        (
            GET_MANUFACTURER,
            "Gets manufacturer for editing in Back Office (uses PHPDoc typing)",
        ),
    ];
    for (pair, description) in expected {
        assert_eq!(parse(pair).description, description);
    }
}

#[test]
fn test_domain_and_slug() {
    let definition = parse(GET_MANUFACTURER);
    assert_eq!(definition.domain, "Manufacturer");
    assert_eq!(definition.simple_class_name, "GetManufacturerForEditing");
    assert_eq!(definition.slug, "get-manufacturer-for-editing");
}

#[test]
fn test_return_type() {
    let expected = [
        (EDIT_TAX, "void".to_string()),
        (ADD_TAX, fqcn(r"Tax\ValueObject\TaxId")),
        (GET_TAX, fqcn(r"Tax\QueryResult\EditableTax")),
        (EDIT_MANUFACTURER, "void".to_string()),
        (ADD_MANUFACTURER, "ManufacturerId".to_string()),
        (GET_MANUFACTURER, "EditableManufacturer".to_string()),
        (ADD_SUPPLIER, "void".to_string()),
    ];
    for (pair, return_type) in expected {
        assert_eq!(parse(pair).return_type, return_type, "return type of {}", pair.0);
    }
}

#[test]
fn test_unknown_classes_are_type_resolution_errors() {
    let index = fixture_index();
    let domains = test_domain_parser();
    let parser = DefinitionParser::new(&index, &domains);

    let err = parser
        .parse_definition(&fqcn(EDIT_TAX.0), "randomNoSuchClass")
        .unwrap_err();
    assert!(matches!(err, DocToolsError::TypeResolution(_)));

    let err = parser
        .parse_definition("randomNoSuchHandlerclass", &fqcn(ADD_MANUFACTURER.1))
        .unwrap_err();
    assert!(matches!(err, DocToolsError::TypeResolution(_)));
}

#[test]
fn test_strongly_typed_constructor_parameters() {
    assert_eq!(
        parse(ADD_TAX).constructor_parameters,
        vec!["array $localizedNames", "float $rate", "bool $enabled"]
    );
    assert_eq!(parse(EDIT_TAX).constructor_parameters, vec!["int $taxId"]);
    assert_eq!(parse(GET_TAX).constructor_parameters, vec!["int $taxId"]);

    assert_eq!(
        parse(ADD_SUPPLIER).constructor_parameters,
        vec![
            "string $name",
            "string $address",
            "string $city",
            "int $countryId",
            "bool $enabled",
            "array $localizedDescriptions",
            "array $localizedMetaTitles",
            "array $localizedMetaDescriptions",
            "array $localizedMetaKeywords",
            "array $shopAssociation",
            "?string $address2 = NULL",
            "?string $postCode = NULL",
            "?int $stateId = NULL",
            "?string $phone = NULL",
            "string $mobilePhone = ''",
            "?string $dni = NULL",
            "?int $zipCode = 0",
        ]
    );
}

#[test]
fn test_phpdoc_typed_constructor_parameters() {
    assert_eq!(
        parse(ADD_MANUFACTURER).constructor_parameters,
        vec![
            "string $name",
            "bool $enabled",
            "string[] $localizedShortDescriptions",
            "string[] $localizedDescriptions",
            "string[] $localizedMetaTitles",
            "string[] $localizedMetaDescriptions",
            "string[] $localizedMetaKeywords",
            "array $shopAssociation",
        ]
    );
    assert_eq!(
        parse(EDIT_MANUFACTURER).constructor_parameters,
        vec!["int $manufacturerId"]
    );
    assert_eq!(
        parse(GET_MANUFACTURER).constructor_parameters,
        vec!["int $manufacturerId"]
    );

    // Untyped optional parameters accept null, so every one of them gets `?`.
    assert_eq!(
        parse(EDIT_SUPPLIER).constructor_parameters,
        vec![
            "int $supplierId",
            "string $name",
            "string $address",
            "string $city",
            "int $countryId",
            "bool $enabled",
            "string[] $localizedDescriptions",
            "string[] $localizedMetaTitles",
            "string[] $localizedMetaDescriptions",
            "array $localizedMetaKeywords",
            "array $shopAssociation",
            "?string $address2 = NULL",
            "?string $postCode = NULL",
            "?int $stateId = NULL",
            "?string $phone = NULL",
            "?string $mobilePhone = ''",
            "?string $dni = NULL",
            "?int $zipCode = 0",
        ]
    );
}
