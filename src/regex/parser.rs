// src/regex/parser.rs
// Recursive descent over the pattern grammar:
//
//   regex       := alternation EOI
//   alternation := concatenation ('|' concatenation)*
//   concat      := repetition+
//   repetition  := atom quantifier?
//   quantifier  := '*' | '+' | '?' | '{' number (',' number?)? '}'
//   atom        := CHAR | ESC | '.' | set | '(' alternation ')'
//   set         := '[' '^'? set_item+ ']'
//
// `|` is lowest precedence, concatenation next, quantifiers bind tightest.

use super::ast::Ast;
use super::scanner::{RegexScanner, RegexToken, RegexTokenKind};
use crate::error::{Error, Result};

/// Decode the byte following a backslash. Three escapes produce control
/// bytes; everything else stands for itself (metacharacters as literals).
#[inline]
fn decode_escape(b: u8) -> u8 {
    match b {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        other => other,
    }
}

pub struct RegexParser<'a> {
    scanner: RegexScanner<'a>,
    current: RegexToken,
}

/// Parse a whole pattern into its syntax tree.
pub fn parse(pattern: &str) -> Result<Ast> {
    RegexParser::new(pattern)?.parse()
}

impl<'a> RegexParser<'a> {
    pub fn new(pattern: &'a str) -> Result<Self> {
        let mut scanner = RegexScanner::new(pattern);
        let current = scanner.next_token()?;
        Ok(Self { scanner, current })
    }

    fn advance(&mut self) -> Result<RegexToken> {
        let prev = self.current;
        self.current = self.scanner.next_token()?;
        Ok(prev)
    }

    fn expect(&mut self, kind: RegexTokenKind, what: &str) -> Result<RegexToken> {
        if self.current.kind != kind {
            return Err(self.err_here(format!("expected {what}")));
        }
        self.advance()
    }

    fn err_here(&self, message: String) -> Error {
        Error::RegexSyntax {
            position: self.current.pos,
            message,
        }
    }

    pub fn parse(mut self) -> Result<Ast> {
        let ast = self.parse_alternation()?;
        if self.current.kind != RegexTokenKind::Eoi {
            return Err(self.err_here("unexpected trailing input".into()));
        }
        Ok(ast)
    }

    fn parse_alternation(&mut self) -> Result<Ast> {
        let mut left = self.parse_concatenation()?;
        while self.current.kind == RegexTokenKind::Alt {
            self.advance()?;
            let right = self.parse_concatenation()?;
            left = Ast::Alt(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_concatenation(&mut self) -> Result<Ast> {
        use RegexTokenKind::{Alt, Eoi, RParen};

        let mut left = self.parse_repetition()?;
        while !matches!(self.current.kind, Eoi | Alt | RParen) {
            let right = self.parse_repetition()?;
            left = Ast::Concat(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_repetition(&mut self) -> Result<Ast> {
        use RegexTokenKind::*;

        let atom = self.parse_atom()?;
        match self.current.kind {
            Star => {
                self.advance()?;
                Ok(Ast::Star(Box::new(atom)))
            }
            Plus => {
                self.advance()?;
                Ok(Ast::Plus(Box::new(atom)))
            }
            Question => {
                self.advance()?;
                Ok(Ast::Question(Box::new(atom)))
            }
            LBrace => self.parse_range_quantifier(atom),
            _ => Ok(atom),
        }
    }

    /// `{n}`, `{n,}` and `{n,m}`, normalized so Thompson never sees `min == 0`:
    /// `{0,1}` becomes `?`, `{0,}` becomes `*`, `{1,}` becomes `+`, `{0,0}`
    /// is rejected, and `{0,m}` becomes `(atom?){m}`.
    fn parse_range_quantifier(&mut self, atom: Ast) -> Result<Ast> {
        let brace_pos = self.current.pos;
        self.expect(RegexTokenKind::LBrace, "`{`")?;

        let min = self.parse_number()?;
        let max = if self.current.kind == RegexTokenKind::Comma {
            self.advance()?;
            if self.current.kind == RegexTokenKind::RBrace {
                None
            } else {
                Some(self.parse_number()?)
            }
        } else {
            Some(min)
        };
        self.expect(RegexTokenKind::RBrace, "`}`")?;

        if let Some(max) = max {
            if max < min {
                return Err(Error::RegexSemantic {
                    position: brace_pos,
                    message: format!("inverted quantifier range {{{min},{max}}}"),
                });
            }
        }

        Ok(match (min, max) {
            (0, Some(0)) => {
                return Err(Error::RegexSemantic {
                    position: brace_pos,
                    message: "quantifier {0,0} matches nothing".into(),
                });
            }
            (0, Some(1)) => Ast::Question(Box::new(atom)),
            (0, None) => Ast::Star(Box::new(atom)),
            (1, None) => Ast::Plus(Box::new(atom)),
            (0, Some(m)) => Ast::Range {
                child: Box::new(Ast::Question(Box::new(atom))),
                min: m,
                max: Some(m),
            },
            (n, m) => Ast::Range {
                child: Box::new(atom),
                min: n,
                max: m,
            },
        })
    }

    fn parse_number(&mut self) -> Result<u32> {
        let start = self.current.pos;
        let mut value: u32 = 0;
        let mut digits = 0usize;

        while let RegexTokenKind::Char(b @ b'0'..=b'9') = self.current.kind {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u32))
                .ok_or_else(|| Error::RegexSyntax {
                    position: start,
                    message: "quantifier bound too large".into(),
                })?;
            digits += 1;
            self.advance()?;
        }

        if digits == 0 {
            return Err(self.err_here("expected number in quantifier".into()));
        }
        Ok(value)
    }

    fn parse_atom(&mut self) -> Result<Ast> {
        use RegexTokenKind::*;

        match self.current.kind {
            Char(b) => {
                self.advance()?;
                Ok(Ast::Char(b))
            }
            Esc(b) => {
                self.advance()?;
                Ok(Ast::Char(decode_escape(b)))
            }
            Dot => {
                self.advance()?;
                Ok(Ast::Dot)
            }
            LBracket => self.parse_set(),
            LParen => {
                self.advance()?;
                let inner = self.parse_alternation()?;
                self.expect(RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.err_here("expected atom".into())),
        }
    }

    /// One set item: a literal byte from a `CHAR` or `ESC` token.
    fn parse_set_char(&mut self) -> Result<(u8, usize)> {
        match self.current.kind {
            RegexTokenKind::Char(b) => {
                let pos = self.advance()?.pos;
                Ok((b, pos))
            }
            RegexTokenKind::Esc(b) => {
                let pos = self.advance()?.pos;
                Ok((decode_escape(b), pos))
            }
            _ => Err(self.err_here("expected character in set".into())),
        }
    }

    fn parse_set(&mut self) -> Result<Ast> {
        use RegexTokenKind::{Caret, Eoi, Hyphen, RBracket};

        let open_pos = self.current.pos;
        self.advance()?; // `[`

        let negated = if self.current.kind == Caret {
            self.advance()?;
            true
        } else {
            false
        };

        let mut chars: Vec<u8> = Vec::new();
        let mut ranges: Vec<(u8, u8)> = Vec::new();

        if self.current.kind == RBracket {
            return Err(Error::RegexSyntax {
                position: self.current.pos,
                message: "empty character set".into(),
            });
        }

        while !matches!(self.current.kind, RBracket | Eoi) {
            // A hyphen with no pending start byte is the literal `-`. This
            // covers `[-a]`, `[^-a]`, and the hyphen after a range in `[a-z-]`.
            if self.current.kind == Hyphen {
                self.advance()?;
                chars.push(b'-');
                continue;
            }

            let (start, start_pos) = self.parse_set_char()?;

            if self.current.kind == Hyphen {
                self.advance()?;
                if self.current.kind == RBracket {
                    // Trailing hyphen is a literal: `[a-]`.
                    chars.push(start);
                    chars.push(b'-');
                    break;
                }
                let (end, _) = self.parse_set_char()?;
                if start > end {
                    return Err(Error::RegexSemantic {
                        position: start_pos,
                        message: format!(
                            "inverted range `{}-{}` in character set",
                            start as char, end as char
                        ),
                    });
                }
                ranges.push((start, end));
            } else {
                chars.push(start);
            }
        }
        self.expect(RBracket, "`]`")?;

        let set = Ast::CharSet {
            negated,
            chars,
            ranges,
        };
        if set.concrete_set().is_empty() {
            return Err(Error::RegexSemantic {
                position: open_pos,
                message: "character set matches no byte".into(),
            });
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(ast: Ast) -> Box<Ast> {
        Box::new(ast)
    }

    #[test]
    fn precedence_alt_below_concat() {
        // ab|c parses as (ab)|c
        let ast = parse("ab|c").unwrap();
        assert_eq!(
            ast,
            Ast::Alt(
                boxed(Ast::Concat(boxed(Ast::Char(b'a')), boxed(Ast::Char(b'b')))),
                boxed(Ast::Char(b'c')),
            )
        );
    }

    #[test]
    fn quantifier_binds_to_last_atom() {
        let ast = parse("ab*").unwrap();
        assert_eq!(
            ast,
            Ast::Concat(boxed(Ast::Char(b'a')), boxed(Ast::Star(boxed(Ast::Char(b'b')))))
        );
    }

    #[test]
    fn grouping_overrides_concat() {
        let ast = parse("(ab)*").unwrap();
        assert_eq!(
            ast,
            Ast::Star(boxed(Ast::Concat(
                boxed(Ast::Char(b'a')),
                boxed(Ast::Char(b'b'))
            )))
        );
    }

    #[test]
    fn brace_quantifiers_rewrite() {
        assert_eq!(parse("a{0,1}").unwrap(), parse("a?").unwrap());
        assert_eq!(parse("a{0,}").unwrap(), parse("a*").unwrap());
        assert_eq!(parse("a{1,}").unwrap(), parse("a+").unwrap());
        assert_eq!(
            parse("a{2,4}").unwrap(),
            Ast::Range {
                child: boxed(Ast::Char(b'a')),
                min: 2,
                max: Some(4),
            }
        );
        assert_eq!(
            parse("a{3}").unwrap(),
            Ast::Range {
                child: boxed(Ast::Char(b'a')),
                min: 3,
                max: Some(3),
            }
        );
    }

    #[test]
    fn zero_min_range_rewrites_to_optional_copies() {
        assert_eq!(
            parse("a{0,3}").unwrap(),
            Ast::Range {
                child: boxed(Ast::Question(boxed(Ast::Char(b'a')))),
                min: 3,
                max: Some(3),
            }
        );
    }

    #[test]
    fn zero_zero_quantifier_rejected() {
        assert!(matches!(
            parse("a{0,0}").unwrap_err(),
            Error::RegexSemantic { .. }
        ));
        assert!(matches!(
            parse("a{0}").unwrap_err(),
            Error::RegexSemantic { .. }
        ));
    }

    #[test]
    fn inverted_quantifier_rejected() {
        assert!(matches!(
            parse("a{4,2}").unwrap_err(),
            Error::RegexSemantic { .. }
        ));
    }

    #[test]
    fn escapes_decode() {
        assert_eq!(parse(r"\n").unwrap(), Ast::Char(b'\n'));
        assert_eq!(parse(r"\*").unwrap(), Ast::Char(b'*'));
        assert_eq!(parse(r"\\").unwrap(), Ast::Char(b'\\'));
    }

    #[test]
    fn set_hyphen_rules() {
        // Leading and trailing hyphens are literals.
        let lead = parse("[-a]").unwrap();
        let trail = parse("[a-]").unwrap();
        for ast in [lead, trail] {
            let Ast::CharSet { chars, ranges, .. } = ast else {
                panic!("expected set");
            };
            assert!(chars.contains(&b'-') && chars.contains(&b'a'));
            assert!(ranges.is_empty());
        }

        let Ast::CharSet { ranges, .. } = parse("[a-z]").unwrap() else {
            panic!("expected set");
        };
        assert_eq!(ranges, vec![(b'a', b'z')]);
    }

    #[test]
    fn inverted_set_range_rejected() {
        assert!(matches!(
            parse("[z-a]").unwrap_err(),
            Error::RegexSemantic { .. }
        ));
    }

    #[test]
    fn empty_set_rejected() {
        assert!(matches!(
            parse("[]").unwrap_err(),
            Error::RegexSyntax { .. }
        ));
        // Negating every printable byte leaves nothing to match.
        assert!(matches!(
            parse("[^ -~]").unwrap_err(),
            Error::RegexSemantic { .. }
        ));
    }

    #[test]
    fn double_quantifier_is_syntax_error() {
        assert!(matches!(
            parse("a**").unwrap_err(),
            Error::RegexSyntax { .. }
        ));
    }

    #[test]
    fn empty_alternative_rejected() {
        assert!(parse("a|").is_err());
        assert!(parse("|a").is_err());
        assert!(parse("").is_err());
    }
}
