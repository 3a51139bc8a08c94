//! Declaration scanner for PHP source files.
//!
//! Walks the token stream of one file and produces a [`TypeDescriptor`] per
//! class-like declaration. Names in `extends`/`implements` clauses, attributes
//! and declared parameter/return types are resolved against the file's
//! namespace and `use` imports, the way PHP resolves them at compile time.
//! Method bodies are skipped.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::descriptor::{
    short_name, DefaultValue, MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
};
use super::lexer::{tokenize, Token};
use crate::error::{DocToolsError, Result};

const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "never", "null",
    "object", "parent", "resource", "self", "static", "string", "true", "void",
];

const PARAMETER_MODIFIERS: &[&str] = &["public", "protected", "private", "readonly"];

/// Scans PHP source text and returns the declared types.
pub fn scan_source(source: &str, path: Option<&Path>) -> Result<Vec<TypeDescriptor>> {
    let location = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());

    let tokens =
        tokenize(source).map_err(|e| DocToolsError::source(format!("{location}: {e}")))?;

    let mut scanner = Scanner {
        tokens: &tokens,
        pos: 0,
        namespace: String::new(),
        imports: HashMap::new(),
        location,
        path,
        source: Arc::from(source),
        types: Vec::new(),
    };
    scanner.scan_file()?;

    Ok(scanner.types)
}

struct Scanner<'t> {
    tokens: &'t [Token],
    pos: usize,
    namespace: String,
    /// Import alias -> fully-qualified name.
    imports: HashMap<String, String>,
    location: String,
    path: Option<&'t Path>,
    source: Arc<str>,
    types: Vec<TypeDescriptor>,
}

fn is_keyword(token: Option<&Token>, keyword: &str) -> bool {
    matches!(token, Some(Token::Name(n)) if n.eq_ignore_ascii_case(keyword))
}

impl<'t> Scanner<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Token `back` positions before the one just consumed.
    fn previous(&self, back: usize) -> Option<&'t Token> {
        self.pos
            .checked_sub(back + 1)
            .and_then(|i| self.tokens.get(i))
    }

    fn error(&self, msg: impl AsRef<str>) -> DocToolsError {
        DocToolsError::source(format!("{}: {}", self.location, msg.as_ref()))
    }

    fn scan_file(&mut self) -> Result<()> {
        let mut doc_comment: Option<String> = None;
        let mut attributes: Vec<String> = Vec::new();

        while let Some(token) = self.next() {
            match token {
                Token::DocComment(text) => doc_comment = Some(text.clone()),
                Token::AttributeOpen => {
                    let names = self.attribute_group();
                    attributes.extend(names);
                }
                Token::Name(word) => match word.to_ascii_lowercase().as_str() {
                    "abstract" | "final" | "readonly" => {}
                    "namespace" => {
                        self.namespace_declaration();
                        doc_comment = None;
                        attributes.clear();
                    }
                    "use" if matches!(self.peek(), Some(Token::Name(_))) => {
                        self.use_declaration();
                        doc_comment = None;
                        attributes.clear();
                    }
                    keyword @ ("class" | "interface" | "trait" | "enum")
                        if self.opens_declaration() =>
                    {
                        let kind = match keyword {
                            "interface" => TypeKind::Interface,
                            "trait" => TypeKind::Trait,
                            "enum" => TypeKind::Enum,
                            _ => TypeKind::Class,
                        };
                        let descriptor = self.type_declaration(
                            kind,
                            doc_comment.take(),
                            std::mem::take(&mut attributes),
                        )?;
                        self.types.push(descriptor);
                    }
                    "function" => {
                        self.skip_function()?;
                        doc_comment = None;
                        attributes.clear();
                    }
                    _ => {
                        doc_comment = None;
                        attributes.clear();
                    }
                },
                _ => {
                    doc_comment = None;
                    attributes.clear();
                }
            }
        }

        Ok(())
    }

    /// `class` in `Foo::class` or `new class` is not a declaration.
    fn opens_declaration(&self) -> bool {
        let after_scope = matches!(self.previous(1), Some(Token::Punct(':')));
        let anonymous = is_keyword(self.previous(1), "new");
        !after_scope && !anonymous && matches!(self.peek(), Some(Token::Name(_)))
    }

    fn namespace_declaration(&mut self) {
        self.namespace = match self.peek() {
            Some(Token::Name(name)) => {
                self.pos += 1;
                name.trim_start_matches('\\').to_string()
            }
            _ => String::new(),
        };
        self.imports.clear();
    }

    fn use_declaration(&mut self) {
        if is_keyword(self.peek(), "function") || is_keyword(self.peek(), "const") {
            self.skip_past(';');
            return;
        }

        while let Some(Token::Name(name)) = self.next() {
            let name = name.trim_start_matches('\\');

            if name.ends_with('\\') && matches!(self.peek(), Some(Token::Punct('{'))) {
                self.pos += 1;
                loop {
                    match self.next() {
                        Some(Token::Name(member)) => {
                            let full = format!("{name}{member}");
                            let alias = self.import_alias(&full);
                            self.imports.insert(alias, full);
                        }
                        Some(Token::Punct('}')) | None => break,
                        Some(_) => {}
                    }
                }
            } else {
                let alias = self.import_alias(name);
                self.imports.insert(alias, name.to_string());
            }

            if !matches!(self.next(), Some(Token::Punct(','))) {
                break;
            }
        }
    }

    fn import_alias(&mut self, full: &str) -> String {
        if is_keyword(self.peek(), "as") {
            self.pos += 1;
            if let Some(Token::Name(alias)) = self.next() {
                return alias.clone();
            }
        }
        short_name(full).to_string()
    }

    fn skip_past(&mut self, terminator: char) {
        while let Some(token) = self.next() {
            if *token == Token::Punct(terminator) {
                break;
            }
        }
    }

    /// Consumes an attribute group after `#[` and returns the attribute names.
    fn attribute_group(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        let mut depth = 1usize;
        let mut parens = 0usize;
        let mut expect_name = true;

        while let Some(token) = self.next() {
            match token {
                Token::Punct('[') | Token::AttributeOpen => depth += 1,
                Token::Punct(']') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Token::Punct('(') => parens += 1,
                Token::Punct(')') => parens = parens.saturating_sub(1),
                Token::Punct(',') if depth == 1 && parens == 0 => expect_name = true,
                Token::Name(name) if expect_name && depth == 1 && parens == 0 => {
                    names.push(self.resolve_name(name));
                    expect_name = false;
                }
                _ => {}
            }
        }

        names
    }

    /// Resolves a class reference against the namespace and imports.
    fn resolve_name(&self, name: &str) -> String {
        if let Some(absolute) = name.strip_prefix('\\') {
            return absolute.to_string();
        }

        let (first, rest) = match name.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        if let Some(imported) = self.imports.get(first) {
            return match rest {
                Some(rest) => format!("{imported}\\{rest}"),
                None => imported.clone(),
            };
        }

        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}\\{}", self.namespace, name)
        }
    }

    /// Like [`Self::resolve_name`], but keeps builtin types as they are.
    fn resolve_type(&self, name: &str) -> String {
        let lower = name.to_ascii_lowercase();
        if BUILTIN_TYPES.contains(&lower.as_str()) {
            lower
        } else {
            self.resolve_name(name)
        }
    }

    fn type_declaration(
        &mut self,
        kind: TypeKind,
        doc_comment: Option<String>,
        attributes: Vec<String>,
    ) -> Result<TypeDescriptor> {
        let short = match self.next() {
            Some(Token::Name(name)) => name.clone(),
            _ => return Err(self.error("expected a type name")),
        };
        let name = if self.namespace.is_empty() {
            short
        } else {
            format!("{}\\{}", self.namespace, short)
        };

        let mut descriptor = TypeDescriptor::new(name, kind);
        descriptor.doc_comment = doc_comment;
        descriptor.attributes = attributes;
        descriptor.source_path = self.path.map(Path::to_path_buf);
        descriptor.source = Some(Arc::clone(&self.source));

        #[derive(PartialEq)]
        enum Clause {
            None,
            Extends,
            Implements,
        }
        let mut clause = Clause::None;

        loop {
            match self.next() {
                Some(Token::Punct('{')) => break,
                Some(Token::Name(word)) if word.eq_ignore_ascii_case("extends") => {
                    clause = Clause::Extends
                }
                Some(Token::Name(word)) if word.eq_ignore_ascii_case("implements") => {
                    clause = Clause::Implements
                }
                Some(Token::Name(word)) => {
                    let resolved = self.resolve_name(word);
                    match clause {
                        Clause::Extends if kind == TypeKind::Interface => {
                            descriptor.interfaces.push(resolved)
                        }
                        Clause::Extends => descriptor.parent = Some(resolved),
                        Clause::Implements => descriptor.interfaces.push(resolved),
                        // Enum backing type.
                        Clause::None => {}
                    }
                }
                Some(_) => {}
                None => {
                    return Err(self.error(format!(
                        "unterminated declaration of {}",
                        descriptor.name
                    )))
                }
            }
        }

        self.type_body(&mut descriptor)?;
        Ok(descriptor)
    }

    fn type_body(&mut self, descriptor: &mut TypeDescriptor) -> Result<()> {
        let mut depth = 1usize;
        let mut doc_comment: Option<String> = None;

        while let Some(token) = self.next() {
            match token {
                Token::Punct('{') => depth += 1,
                Token::Punct('}') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                    doc_comment = None;
                }
                Token::Punct(';') => doc_comment = None,
                Token::DocComment(text) if depth == 1 => doc_comment = Some(text.clone()),
                Token::AttributeOpen => {
                    self.attribute_group();
                }
                Token::Name(word) if depth == 1 && word.eq_ignore_ascii_case("function") => {
                    let method = self.method_declaration(doc_comment.take())?;
                    descriptor.methods.push(method);
                }
                Token::Name(word) if depth == 1 && word.eq_ignore_ascii_case("use") => {
                    self.trait_use(descriptor);
                }
                _ => {}
            }
        }

        Err(self.error(format!("unterminated body of {}", descriptor.name)))
    }

    fn trait_use(&mut self, descriptor: &mut TypeDescriptor) {
        loop {
            match self.next() {
                Some(Token::Name(name)) => descriptor.traits.push(self.resolve_name(name)),
                Some(Token::Punct(',')) => {}
                Some(Token::Punct('{')) => {
                    // Conflict resolution block.
                    self.skip_past('}');
                    break;
                }
                Some(Token::Punct(';')) | None => break,
                Some(_) => {}
            }
        }
    }

    fn method_declaration(&mut self, doc_comment: Option<String>) -> Result<MethodDescriptor> {
        if matches!(self.peek(), Some(Token::Punct('&'))) {
            self.pos += 1;
        }
        let name = match self.next() {
            Some(Token::Name(name)) => name.clone(),
            _ => return Err(self.error("expected a method name")),
        };
        if !matches!(self.next(), Some(Token::Punct('('))) {
            return Err(self.error(format!("expected '(' after method {name}")));
        }

        let parameter_tokens = self.balanced(')', '(')?;
        let parameters = split_top_level(parameter_tokens)
            .into_iter()
            .filter_map(|tokens| self.parameter(tokens))
            .collect();

        let return_type = if matches!(self.peek(), Some(Token::Punct(':'))) {
            self.pos += 1;
            let start = self.pos;
            while !matches!(
                self.peek(),
                Some(Token::Punct('{')) | Some(Token::Punct(';')) | None
            ) {
                self.pos += 1;
            }
            self.type_string(&self.tokens[start..self.pos])
                .map(|(ty, _)| ty)
        } else {
            None
        };

        match self.next() {
            Some(Token::Punct(';')) => {}
            Some(Token::Punct('{')) => {
                self.balanced('}', '{')?;
            }
            _ => return Err(self.error(format!("expected a body for method {name}"))),
        }

        Ok(MethodDescriptor {
            name,
            doc_comment,
            parameters,
            return_type,
        })
    }

    /// Consumes tokens up to the closer matching an already consumed opener and
    /// returns the enclosed tokens.
    fn balanced(&mut self, close: char, open: char) -> Result<&'t [Token]> {
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(token) = self.next() {
            match token {
                Token::Punct(c) if *c == open => depth += 1,
                Token::Punct(c) if *c == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.tokens[start..self.pos - 1]);
                    }
                }
                _ => {}
            }
        }
        Err(self.error(format!("missing '{close}'")))
    }

    fn skip_function(&mut self) -> Result<()> {
        if matches!(self.peek(), Some(Token::Punct('&'))) {
            self.pos += 1;
        }
        if matches!(self.peek(), Some(Token::Name(_))) {
            self.pos += 1;
        }
        if !matches!(self.peek(), Some(Token::Punct('('))) {
            return Ok(());
        }
        self.pos += 1;
        self.balanced(')', '(')?;

        loop {
            match self.peek() {
                Some(Token::Punct('{')) => {
                    self.pos += 1;
                    self.balanced('}', '{')?;
                    return Ok(());
                }
                Some(Token::Punct(';')) | None => return Ok(()),
                Some(Token::Punct('(')) => {
                    // Closure `use (...)` list.
                    self.pos += 1;
                    self.balanced(')', '(')?;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn parameter(&self, tokens: &[Token]) -> Option<ParameterDescriptor> {
        let mut type_tokens: Vec<&Token> = Vec::new();
        let mut variadic = false;
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::AttributeOpen => {
                    let mut depth = 1usize;
                    while depth > 0 && i + 1 < tokens.len() {
                        i += 1;
                        match tokens[i] {
                            Token::Punct('[') | Token::AttributeOpen => depth += 1,
                            Token::Punct(']') => depth -= 1,
                            _ => {}
                        }
                    }
                }
                Token::Name(word)
                    if type_tokens.is_empty()
                        && PARAMETER_MODIFIERS.contains(&word.to_ascii_lowercase().as_str()) => {}
                Token::Ellipsis => variadic = true,
                Token::Punct('&')
                    if matches!(
                        tokens.get(i + 1),
                        Some(Token::Variable(_)) | Some(Token::Ellipsis)
                    ) => {}
                Token::Variable(name) => {
                    let mut parameter = ParameterDescriptor::new(name.clone());
                    parameter.variadic = variadic;
                    if let Some((declared, nullable)) = self.type_string(type_tokens) {
                        parameter.declared_type = Some(declared);
                        parameter.nullable = nullable;
                    }
                    if matches!(tokens.get(i + 1), Some(Token::Punct('='))) {
                        let default = DefaultValue::parse(&join_tokens(&tokens[i + 2..]));
                        parameter = parameter.with_default(default);
                    }
                    return Some(parameter);
                }
                other => type_tokens.push(other),
            }
            i += 1;
        }

        None
    }

    /// Builds a type string, dropping `null` members. Returns the type and
    /// whether it accepts null.
    fn type_string<'a>(
        &self,
        tokens: impl IntoIterator<Item = &'a Token>,
    ) -> Option<(String, bool)> {
        let mut members: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut nullable = false;

        for token in tokens {
            match token {
                Token::Punct('?') => nullable = true,
                Token::Punct('|') => members.push(std::mem::take(&mut current)),
                Token::Punct(c @ ('&' | '(' | ')')) => current.push(*c),
                Token::Name(name) => current.push_str(&self.resolve_type(name)),
                _ => {}
            }
        }
        members.push(current);

        let mut kept: Vec<String> = Vec::new();
        for member in members {
            if member.is_empty() {
                continue;
            }
            if member == "null" {
                nullable = true;
                continue;
            }
            kept.push(member);
        }

        if kept.is_empty() {
            return nullable.then(|| ("null".to_string(), true));
        }
        Some((kept.join("|"), nullable))
    }
}

/// Splits a parameter list on commas that are not nested in brackets.
fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Punct('(' | '[' | '{') | Token::AttributeOpen => depth += 1,
            Token::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            Token::Punct(',') if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }

    parts
}

/// Re-assembles the source text of an expression from its tokens.
fn join_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    let mut previous_was_word = false;

    for token in tokens {
        let (piece, is_word) = match token {
            Token::Name(name) => (name.clone(), true),
            Token::Variable(name) => (format!("${name}"), true),
            Token::Str(raw) | Token::Number(raw) => (raw.clone(), true),
            Token::Punct(c) => (c.to_string(), false),
            Token::Ellipsis => ("...".to_string(), false),
            Token::AttributeOpen => ("#[".to_string(), false),
            Token::DocComment(_) => continue,
        };
        if is_word && previous_was_word {
            text.push(' ');
        }
        text.push_str(&piece);
        previous_was_word = is_word;
    }

    text
}
