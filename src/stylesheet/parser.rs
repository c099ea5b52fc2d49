//! Stylesheet source parser
//!
//! A small permissive block parser producing a [`Stylesheet`]. It only knows
//! enough structure to separate comments, at-rules, rules and declarations; the
//! text inside selectors, values and at-rule parameters is kept verbatim.
//! Quotes, parentheses and `#{...}` interpolation braces are skipped over while
//! scanning so that `{`, `;` and `}` inside them do not end a statement.

use crate::error::{Error, Result};
use crate::stylesheet::node::{NodeId, NodeKind, Position, Stylesheet};

/// Parse stylesheet source into a tree
pub fn parse(source: &str) -> Result<Stylesheet> {
    let mut parser = Parser {
        input: source,
        pos: 0,
        line: 1,
        column: 1,
    };
    let mut tree = Stylesheet::new();
    let root = tree.root();
    parser.parse_block(&mut tree, root, false)?;
    Ok(tree)
}

/// What ended a scanned statement prefix
#[derive(Debug, Clone, Copy, PartialEq)]
enum Terminator {
    OpenBrace,
    Semicolon,
    CloseBrace,
    End,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Parser<'a> {
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error_at(&self, position: Position, message: impl Into<String>) -> Error {
        Error::Parse {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Parse statements into `parent` until `}` (when `nested`) or end of input
    fn parse_block(&mut self, tree: &mut Stylesheet, parent: NodeId, nested: bool) -> Result<()> {
        loop {
            self.skip_whitespace();
            let start = self.here();

            match self.peek_char() {
                None if nested => return Err(self.error_at(start, "Unclosed block")),
                None => return Ok(()),
                Some('}') if nested => {
                    self.bump();
                    return Ok(());
                }
                Some('}') => return Err(self.error_at(start, "Unexpected '}'")),
                Some(';') => {
                    self.bump();
                }
                Some('/') if self.starts_with("/*") => {
                    let text = self.scan_comment(start)?;
                    let node = tree.append(parent, NodeKind::Comment { text });
                    tree.set_position(node, start);
                }
                Some('@') => {
                    self.bump();
                    self.parse_at_rule(tree, parent, start)?;
                }
                Some(_) => self.parse_rule_or_declaration(tree, parent, start)?,
            }
        }
    }

    fn scan_comment(&mut self, start: Position) -> Result<String> {
        self.bump();
        self.bump();
        let body_start = self.pos;
        while !self.starts_with("*/") {
            if self.bump().is_none() {
                return Err(self.error_at(start, "Unterminated comment"));
            }
        }
        let text = self.input[body_start..self.pos].to_string();
        self.bump();
        self.bump();
        Ok(text)
    }

    fn parse_at_rule(&mut self, tree: &mut Stylesheet, parent: NodeId, start: Position) -> Result<()> {
        let name_start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        let name = self.input[name_start..self.pos].to_string();
        let (params, terminator) = self.scan_statement()?;
        let params = params.trim().to_string();

        match terminator {
            Terminator::OpenBrace => {
                let node = tree.append(parent, NodeKind::at_rule(name, params));
                tree.set_position(node, start);
                self.parse_block(tree, node, true)
            }
            Terminator::Semicolon | Terminator::CloseBrace | Terminator::End => {
                let node = tree.append(
                    parent,
                    NodeKind::AtRule {
                        name,
                        params,
                        has_block: false,
                    },
                );
                tree.set_position(node, start);
                Ok(())
            }
        }
    }

    fn parse_rule_or_declaration(&mut self, tree: &mut Stylesheet, parent: NodeId, start: Position) -> Result<()> {
        let (text, terminator) = self.scan_statement()?;

        if terminator == Terminator::OpenBrace {
            let node = tree.append(parent, NodeKind::rule(text.trim()));
            tree.set_position(node, start);
            return self.parse_block(tree, node, true);
        }

        let Some(colon) = find_top_level_colon(&text) else {
            return Err(self.error_at(start, format!("Expected ':' in declaration '{}'", text.trim())));
        };
        let prop = text[..colon].trim();
        let value = text[colon + 1..].trim();
        let node = tree.append(parent, NodeKind::declaration(prop, value));
        tree.set_position(node, start);
        Ok(())
    }

    /// Scan up to the next top-level `{`, `;` or `}`.
    ///
    /// `{` and `;` are consumed, `}` is left for the enclosing block.
    fn scan_statement(&mut self) -> Result<(String, Terminator)> {
        let start = self.pos;
        let mut parens = 0usize;
        let mut interpolation = 0usize;

        loop {
            let Some(ch) = self.peek_char() else {
                return Ok((self.input[start..].to_string(), Terminator::End));
            };

            match ch {
                '\\' => {
                    self.bump();
                    self.bump();
                    continue;
                }
                '"' | '\'' => {
                    self.skip_string(ch);
                    continue;
                }
                '#' if self.starts_with("#{") => {
                    interpolation += 1;
                    self.bump();
                }
                '}' if interpolation > 0 => interpolation -= 1,
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                '{' | ';' | '}' if parens == 0 && interpolation == 0 => {
                    let text = self.input[start..self.pos].to_string();
                    let terminator = match ch {
                        '{' => Terminator::OpenBrace,
                        ';' => Terminator::Semicolon,
                        _ => Terminator::CloseBrace,
                    };
                    if terminator != Terminator::CloseBrace {
                        self.bump();
                    }
                    return Ok((text, terminator));
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn skip_string(&mut self, quote: char) {
        self.bump();
        while let Some(ch) = self.bump() {
            if ch == '\\' {
                self.bump();
            } else if ch == quote {
                break;
            }
        }
    }
}

/// Byte offset of the first `:` outside `#{...}` and parentheses
fn find_top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '#' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                depth += 1;
            }
            '(' => depth += 1,
            '}' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
