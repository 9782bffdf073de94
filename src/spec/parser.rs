// src/spec/parser.rs
use hashbrown::HashMap;

use super::scanner::{SpecScanner, SpecToken, Spanned};
use crate::error::{Error, Result};

/// One `NAME ::= "pattern"` line, in definition order. The position of a
/// definition in the returned list is its token index and its priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDef {
    pub name: String,
    pub pattern: String,
    pub line: usize,
}

pub struct SpecParser<'a> {
    scanner: SpecScanner<'a>,
    current: Spanned,
}

/// Parse a whole specification file body into its ordered definition list.
/// Redefining a token kind is an error, never an override.
pub fn parse_spec(input: &str) -> Result<Vec<TokenDef>> {
    SpecParser::new(input)?.parse()
}

impl<'a> SpecParser<'a> {
    pub fn new(input: &'a str) -> Result<Self> {
        let mut scanner = SpecScanner::new(input);
        let current = scanner.next_token()?;
        Ok(Self { scanner, current })
    }

    fn advance(&mut self) -> Result<Spanned> {
        let prev = std::mem::replace(&mut self.current, self.scanner.next_token()?);
        Ok(prev)
    }

    fn err_here(&self, message: String) -> Error {
        Error::SpecSyntax {
            line: self.current.line,
            column: self.current.column,
            message,
        }
    }

    pub fn parse(mut self) -> Result<Vec<TokenDef>> {
        let mut defs = vec![self.parse_definition()?];

        while self.current.token == SpecToken::Newline {
            self.advance()?;
            if self.current.token == SpecToken::Eof {
                break; // single trailing newline
            }
            defs.push(self.parse_definition()?);
        }

        if self.current.token != SpecToken::Eof {
            return Err(self.err_here("expected end of specification".into()));
        }

        {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for def in &defs {
                if let Some(&first_line) = seen.get(def.name.as_str()) {
                    return Err(Error::DuplicateToken {
                        name: def.name.clone(),
                        first_line,
                        second_line: def.line,
                    });
                }
                seen.insert(&def.name, def.line);
            }
        }

        Ok(defs)
    }

    fn parse_definition(&mut self) -> Result<TokenDef> {
        let head = self.advance()?;
        let SpecToken::Name(name) = head.token else {
            return Err(Error::SpecSyntax {
                line: head.line,
                column: head.column,
                message: "expected token kind name".into(),
            });
        };

        if self.current.token != SpecToken::Define {
            return Err(self.err_here(format!("expected `::=` after `{name}`")));
        }
        self.advance()?;

        let body = self.advance()?;
        let SpecToken::Pattern(pattern) = body.token else {
            return Err(Error::SpecSyntax {
                line: body.line,
                column: body.column,
                message: format!("expected quoted pattern for `{name}`"),
            });
        };

        Ok(TokenDef {
            name,
            pattern,
            line: head.line,
        })
    }
}
