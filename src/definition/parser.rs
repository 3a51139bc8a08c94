//! Builds a [`Definition`] from a handler/command pair.

use tracing::debug;

use super::docblock;
use super::{Definition, DefinitionKind};
use crate::casing::to_kebab_case;
use crate::domain::DomainParser;
use crate::error::{DocToolsError, Result};
use crate::source::{
    short_name, MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeIntrospector,
};

/// Method every command and query handler exposes.
pub const HANDLER_METHOD_NAME: &str = "handle";

const CONSTRUCTOR_NAME: &str = "__construct";

const VOID: &str = "void";

/// Turns a handler/command pair into a documentation record.
pub trait ParseDefinition {
    fn parse_definition(&self, handler_class: &str, command_class: &str) -> Result<Definition>;
}

/// Definition parser backed by static type introspection.
pub struct DefinitionParser<'a> {
    types: &'a dyn TypeIntrospector,
    domain_parser: &'a dyn DomainParser,
}

impl<'a> DefinitionParser<'a> {
    pub fn new(types: &'a dyn TypeIntrospector, domain_parser: &'a dyn DomainParser) -> Self {
        Self {
            types,
            domain_parser,
        }
    }

    /// Renders constructor parameters, following an inherited constructor if
    /// the command declares none.
    fn constructor_parameters(&self, command: &TypeDescriptor) -> Vec<String> {
        match self.types.find_method(command, CONSTRUCTOR_NAME) {
            Some((_, constructor)) => constructor
                .parameters
                .iter()
                .map(|param| render_parameter(param, constructor))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Resolves what `handle` returns. The first implemented interface that
    /// declares `handle` takes precedence over the handler itself.
    fn return_type(&self, handler: &TypeDescriptor) -> Result<String> {
        let from_interface = self
            .types
            .interface_names(handler)
            .iter()
            .filter_map(|name| self.types.get_type(name))
            .find_map(|interface| self.types.find_method(interface, HANDLER_METHOD_NAME));

        let (declaring, method) = from_interface
            .or_else(|| self.types.find_method(handler, HANDLER_METHOD_NAME))
            .ok_or_else(|| {
                DocToolsError::type_resolution(format!(
                    "Method {}::{}() does not exist",
                    handler.name, HANDLER_METHOD_NAME
                ))
            })?;

        if let Some(tag) = method.doc_comment.as_deref().and_then(docblock::return_tag) {
            return Ok(qualify_doc_type(&tag, handler, declaring));
        }

        Ok(method
            .return_type
            .clone()
            .unwrap_or_else(|| VOID.to_string()))
    }
}

impl ParseDefinition for DefinitionParser<'_> {
    fn parse_definition(&self, handler_class: &str, command_class: &str) -> Result<Definition> {
        let command = self.types.resolve(command_class)?;
        let handler = self.types.resolve(handler_class)?;

        let command_class = command_class.trim_start_matches('\\');
        let simple_class_name = short_name(command_class).to_string();

        let definition = Definition {
            kind: DefinitionKind::of_class(command_class),
            domain: self.domain_parser.parse_domain(command_class),
            handler_class: handler_class.trim_start_matches('\\').to_string(),
            command_class: command_class.to_string(),
            constructor_parameters: self.constructor_parameters(command),
            description: command
                .doc_comment
                .as_deref()
                .map(docblock::description)
                .unwrap_or_default(),
            return_type: self.return_type(handler)?,
            handler_interfaces: self.types.interface_names(handler),
            slug: to_kebab_case(&simple_class_name),
            simple_class_name,
        };

        debug!(
            "Parsed {} {} (domain '{}')",
            definition.kind, definition.command_class, definition.domain
        );
        Ok(definition)
    }
}

/// Renders a parameter as `[?]<type> $<name>[ = <default>]`.
///
/// The type falls back to the constructor's `@param` tag. Optional parameters
/// that accept null get a `?` prefix and lose any explicit `null` member.
fn render_parameter(param: &ParameterDescriptor, constructor: &MethodDescriptor) -> String {
    let param_type = param.declared_type.clone().or_else(|| {
        constructor
            .doc_comment
            .as_deref()
            .and_then(|doc| docblock::param_tag(doc, &param.name))
    });

    let name = if param.variadic {
        format!("...${}", param.name)
    } else {
        format!("${}", param.name)
    };

    let mut rendered = match &param_type {
        Some(param_type) => format!("{param_type} {name}"),
        None => name,
    };

    if let Some(default) = &param.default {
        if param.allows_null() && param_type.is_some() {
            rendered = format!("?{}", rendered.replace("|null", "").replace("null|", ""));
        }
        rendered = format!("{} = {}", rendered, default.to_literal());
    }

    rendered
}

/// Qualifies a `@return` type through the `use` imports of the handler file,
/// then of the file declaring the method. Unknown names are kept as written.
fn qualify_doc_type(tag: &str, handler: &TypeDescriptor, declaring: &TypeDescriptor) -> String {
    let (element, is_array) = docblock::split_array_suffix(tag);

    let qualified = [handler, declaring]
        .iter()
        .filter_map(|ty| ty.source.as_deref())
        .find_map(|source| docblock::find_import(source, element))
        .unwrap_or_else(|| element.to_string());

    if is_array {
        format!("{qualified}[]")
    } else {
        qualified
    }
}
