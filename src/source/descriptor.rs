//! Statically-declared type descriptors.
//!
//! These records hold what the documentation pass needs to know about a PHP
//! type: its doc comment, attributes, interfaces, parent, methods and their
//! parameters. They are produced by the source scanner or registered by hand.

use std::path::PathBuf;
use std::sync::Arc;

/// Kind of class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// Descriptor of a class, interface, trait, or enum.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Fully-qualified name without a leading backslash.
    pub name: String,
    /// Declaration kind.
    pub kind: TypeKind,
    /// Raw doc comment (`/** ... */`) directly preceding the declaration.
    pub doc_comment: Option<String>,
    /// Fully-qualified attribute names, in declaration order.
    pub attributes: Vec<String>,
    /// Parent class (`extends`) for classes.
    pub parent: Option<String>,
    /// Implemented interfaces for classes and enums, parent interfaces for interfaces.
    pub interfaces: Vec<String>,
    /// Traits pulled in with `use` inside the body.
    pub traits: Vec<String>,
    /// Methods declared in the body, in declaration order.
    pub methods: Vec<MethodDescriptor>,
    /// File the type was scanned from.
    pub source_path: Option<PathBuf>,
    /// Full text of the declaring file, used for import lookups.
    pub source: Option<Arc<str>>,
}

impl TypeDescriptor {
    /// Creates an empty descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim_start_matches('\\').to_string(),
            kind,
            doc_comment: None,
            attributes: Vec::new(),
            parent: None,
            interfaces: Vec::new(),
            traits: Vec::new(),
            methods: Vec::new(),
            source_path: None,
            source: None,
        }
    }

    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Attaches the declaring file text so imports can be looked up.
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the name without its namespace.
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// Finds a method declared directly on this type (case-insensitive, like PHP).
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if an attribute with the given short name is present.
    pub fn has_attribute(&self, short: &str) -> bool {
        self.attributes.iter().any(|a| short_name(a) == short)
    }
}

/// Descriptor of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub doc_comment: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Declared return type, names fully qualified, `null` members removed.
    pub return_type: Option<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc_comment: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_doc_comment(mut self, doc_comment: impl Into<String>) -> Self {
        self.doc_comment = Some(doc_comment.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }
}

/// Descriptor of a single method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Name without the `$` sigil.
    pub name: String,
    /// Declared type with `null` members removed.
    pub declared_type: Option<String>,
    /// Declared type accepts null (`?T`, `T|null`, or a `null` default).
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub variadic: bool,
}

impl ParameterDescriptor {
    /// An untyped, required parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            nullable: false,
            default: None,
            variadic: false,
        }
    }

    pub fn typed(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        if default == DefaultValue::Null {
            self.nullable = true;
        }
        self.default = Some(default);
        self
    }

    /// Optional parameters have a default value or are variadic.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.variadic
    }

    /// Untyped parameters always accept null.
    pub fn allows_null(&self) -> bool {
        self.declared_type.is_none() || self.nullable
    }
}

/// Default value of an optional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    EmptyArray,
    /// Anything that needs evaluation (constants, non-empty arrays, `new` expressions).
    Expression(String),
}

impl DefaultValue {
    /// Interprets the source text of a default value expression.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "null" | "\\null" => return Self::Null,
            "true" | "\\true" => return Self::Bool(true),
            "false" | "\\false" => return Self::Bool(false),
            "[]" | "array()" => return Self::EmptyArray,
            _ => {}
        }

        if let Ok(value) = raw.replace('_', "").parse::<i64>() {
            return Self::Int(value);
        }

        let numeric = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'));
        if numeric {
            if let Ok(value) = raw.replace('_', "").parse::<f64>() {
                return Self::Float(value);
            }
        }

        if let Some(inner) = strip_quotes(raw, '\'') {
            return Self::String(unescape_single_quoted(inner));
        }
        if let Some(inner) = strip_quotes(raw, '"') {
            return Self::String(unescape_double_quoted(inner));
        }

        Self::Expression(raw.to_string())
    }

    /// Renders the value the way PHP's `var_export` prints it.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{value:.1}")
                } else {
                    value.to_string()
                }
            }
            Self::String(value) => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            Self::EmptyArray => "array (\n)".to_string(),
            Self::Expression(raw) => raw.clone(),
        }
    }
}

/// Returns the part of a qualified name after the last backslash.
pub fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

fn strip_quotes(raw: &str, quote: char) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

fn unescape_single_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(escaped @ ('\\' | '"' | '$')) => out.push(escaped),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}
