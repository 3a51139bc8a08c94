//! Minimal PHP tokenizer.
//!
//! Only distinguishes what declaration scanning needs: names, variables,
//! literals, doc comments, attribute openers and punctuation. Ordinary
//! comments, whitespace and inline HTML are dropped.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Full `/** ... */` text.
    DocComment(String),
    /// Identifier or qualified name, possibly with a leading backslash.
    Name(String),
    /// Variable name without the `$` sigil.
    Variable(String),
    /// String literal including its quotes.
    Str(String),
    Number(String),
    /// `#[`
    AttributeOpen,
    /// `...`
    Ellipsis,
    Punct(char),
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    Lexer {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        tokens: Vec::new(),
    }
    .run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c as u32 >= 0x80
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c as u32 >= 0x80
}

impl Lexer {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.peek(0) == Some('\n') {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn slice(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn run(mut self) -> Result<Vec<Token>, String> {
        while let Some(c) = self.peek(0) {
            if self.starts_with("<?php") {
                self.advance(5);
                continue;
            }
            if self.starts_with("?>") {
                self.skip_inline_html();
                continue;
            }

            match c {
                c if c.is_whitespace() => self.advance(1),
                '/' if self.peek(1) == Some('/') => self.skip_line(),
                '#' if self.peek(1) == Some('[') => {
                    self.advance(2);
                    self.tokens.push(Token::AttributeOpen);
                }
                '#' => self.skip_line(),
                '/' if self.peek(1) == Some('*') => self.block_comment()?,
                '\'' | '"' | '`' => self.string_literal(c)?,
                '<' if self.starts_with("<<<") => self.heredoc()?,
                '$' if self.peek(1).is_some_and(is_name_start) => {
                    self.advance(1);
                    let start = self.pos;
                    while self.peek(0).is_some_and(is_name_char) {
                        self.advance(1);
                    }
                    self.tokens.push(Token::Variable(self.slice(start)));
                }
                '.' if self.starts_with("...") => {
                    self.advance(3);
                    self.tokens.push(Token::Ellipsis);
                }
                c if c.is_ascii_digit()
                    || (c == '.' && self.peek(1).is_some_and(|n| n.is_ascii_digit())) =>
                {
                    let start = self.pos;
                    while self
                        .peek(0)
                        .is_some_and(|n| n.is_ascii_alphanumeric() || n == '_' || n == '.')
                    {
                        self.advance(1);
                    }
                    self.tokens.push(Token::Number(self.slice(start)));
                }
                c if is_name_start(c)
                    || (c == '\\' && self.peek(1).is_some_and(is_name_start)) =>
                {
                    self.name();
                }
                _ => {
                    self.advance(1);
                    self.tokens.push(Token::Punct(c));
                }
            }
        }

        Ok(self.tokens)
    }

    fn name(&mut self) {
        let start = self.pos;
        loop {
            match self.peek(0) {
                Some(c) if is_name_char(c) => self.advance(1),
                // Qualified names, including the `Prefix\{` of group imports.
                Some('\\')
                    if self
                        .peek(1)
                        .is_some_and(|n| is_name_start(n) || n == '{') =>
                {
                    self.advance(1)
                }
                _ => break,
            }
        }
        self.tokens.push(Token::Name(self.slice(start)));
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.advance(1);
        }
    }

    fn skip_inline_html(&mut self) {
        self.advance(2);
        while self.peek(0).is_some() && !self.starts_with("<?php") {
            self.advance(1);
        }
    }

    fn block_comment(&mut self) -> Result<(), String> {
        let start = self.pos;
        let start_line = self.line;
        self.advance(2);
        loop {
            if self.peek(0).is_none() {
                return Err(format!("unterminated comment starting on line {start_line}"));
            }
            if self.starts_with("*/") {
                self.advance(2);
                break;
            }
            self.advance(1);
        }

        let text = self.slice(start);
        if text.starts_with("/**") && text != "/**/" {
            self.tokens.push(Token::DocComment(text));
        }
        Ok(())
    }

    fn string_literal(&mut self, quote: char) -> Result<(), String> {
        let start = self.pos;
        let start_line = self.line;
        self.advance(1);
        loop {
            match self.peek(0) {
                None => {
                    return Err(format!("unterminated string starting on line {start_line}"))
                }
                Some('\\') => self.advance(2),
                Some(c) if c == quote => {
                    self.advance(1);
                    break;
                }
                Some(_) => self.advance(1),
            }
        }
        self.tokens.push(Token::Str(self.slice(start)));
        Ok(())
    }

    fn heredoc(&mut self) -> Result<(), String> {
        let start = self.pos;
        let start_line = self.line;
        self.advance(3);
        while matches!(self.peek(0), Some(' ') | Some('\t')) {
            self.advance(1);
        }
        if matches!(self.peek(0), Some('\'') | Some('"')) {
            self.advance(1);
        }
        let label_start = self.pos;
        while self.peek(0).is_some_and(is_name_char) {
            self.advance(1);
        }
        let label = self.slice(label_start);
        if label.is_empty() {
            // Not a heredoc after all, e.g. a shift followed by a comparison.
            self.pos = start;
            self.advance(1);
            self.tokens.push(Token::Punct('<'));
            return Ok(());
        }
        self.skip_line();

        loop {
            if self.peek(0).is_none() {
                return Err(format!("unterminated heredoc starting on line {start_line}"));
            }
            // At a newline: look at the next line for the closing label.
            self.advance(1);
            while matches!(self.peek(0), Some(' ') | Some('\t')) {
                self.advance(1);
            }
            if self.starts_with(&label)
                && !self
                    .peek(label.chars().count())
                    .is_some_and(is_name_char)
            {
                self.advance(label.chars().count());
                break;
            }
            self.skip_line();
        }

        self.tokens.push(Token::Str(self.slice(start)));
        Ok(())
    }
}
