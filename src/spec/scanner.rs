// src/spec/scanner.rs
// Tokenizer for .lexy specification files. One definition per line:
//
//   TOKEN_KIND ::= "regex"
//
// Spaces and tabs are insignificant outside quotes; newlines separate
// definitions and are reported as their own token.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecToken {
    /// A token-kind identifier: `[A-Z_]+`.
    Name(String),
    /// The `::=` definition symbol.
    Define,
    /// A quoted pattern with the quotes stripped; escape pairs are kept raw
    /// for the regex scanner to decode.
    Pattern(String),
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: SpecToken,
    pub line: usize,
    pub column: usize,
}

pub struct SpecScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> SpecScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn err(&self, line: usize, column: usize, message: String) -> Error {
        Error::SpecSyntax {
            line,
            column,
            message,
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned> {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | 0x0b | 0x0c)) {
            self.advance();
        }

        let (line, column) = (self.line, self.column);
        let spanned = |token| Spanned {
            token,
            line,
            column,
        };

        let Some(b) = self.advance() else {
            return Ok(spanned(SpecToken::Eof));
        };

        match b {
            b'\n' => Ok(spanned(SpecToken::Newline)),
            b'"' => self.scan_pattern(line, column).map(spanned),
            b'A'..=b'Z' | b'_' => {
                let mut name = String::new();
                name.push(b as char);
                while let Some(next @ (b'A'..=b'Z' | b'_')) = self.peek() {
                    self.advance();
                    name.push(next as char);
                }
                Ok(spanned(SpecToken::Name(name)))
            }
            b':' => {
                if self.peek() == Some(b':') {
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        return Ok(spanned(SpecToken::Define));
                    }
                }
                Err(self.err(line, column, "expected `::=`".into()))
            }
            other => Err(self.err(
                line,
                column,
                format!("unexpected character `{}`", other as char),
            )),
        }
    }

    /// The opening quote is consumed; read bytes until the closing quote,
    /// passing `\x` pairs through untouched.
    fn scan_pattern(&mut self, line: usize, column: usize) -> Result<SpecToken> {
        let mut pattern = String::new();
        loop {
            let Some(b) = self.advance() else {
                return Err(self.err(line, column, "unterminated pattern: missing `\"`".into()));
            };
            match b {
                b'"' => return Ok(SpecToken::Pattern(pattern)),
                b'\\' => {
                    let Some(escaped) = self.advance() else {
                        return Err(self.err(
                            line,
                            column,
                            "unterminated pattern: escape at end of input".into(),
                        ));
                    };
                    pattern.push('\\');
                    pattern.push(escaped as char);
                }
                other => pattern.push(other as char),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<SpecToken> {
        let mut sc = SpecScanner::new(input);
        let mut out = Vec::new();
        loop {
            let t = sc.next_token().unwrap();
            let done = t.token == SpecToken::Eof;
            out.push(t.token);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn one_definition() {
        assert_eq!(
            tokens("ID ::= \"[a-z]+\""),
            vec![
                SpecToken::Name("ID".into()),
                SpecToken::Define,
                SpecToken::Pattern("[a-z]+".into()),
                SpecToken::Eof,
            ]
        );
    }

    #[test]
    fn escaped_quote_stays_in_pattern() {
        assert_eq!(
            tokens(r#"STR ::= "\"x\"""#),
            vec![
                SpecToken::Name("STR".into()),
                SpecToken::Define,
                SpecToken::Pattern(r#"\"x\""#.into()),
                SpecToken::Eof,
            ]
        );
    }

    #[test]
    fn newline_is_a_token() {
        let ts = tokens("A ::= \"a\"\nB ::= \"b\"\n");
        assert_eq!(
            ts.iter()
                .filter(|t| matches!(t, SpecToken::Newline))
                .count(),
            2
        );
    }

    #[test]
    fn unterminated_pattern_reports_open_quote() {
        let mut sc = SpecScanner::new("A ::= \"ab");
        sc.next_token().unwrap();
        sc.next_token().unwrap();
        let err = sc.next_token().unwrap_err();
        match err {
            Error::SpecSyntax { line, column, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column, 7);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lone_colon_rejected() {
        let mut sc = SpecScanner::new("A := \"a\"");
        sc.next_token().unwrap();
        assert!(sc.next_token().is_err());
    }
}
