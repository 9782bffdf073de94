// src/regex/ast.rs

/// Pattern syntax tree. A closed set of variants; Thompson construction and
/// the AST visualizer match exhaustively on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Match exactly one byte.
    Char(u8),
    /// Match any printable byte (32..=126).
    Dot,
    /// `[...]` / `[^...]` with its items still symbolic. The concrete byte
    /// set is computed by [`Ast::concrete_set`].
    CharSet {
        negated: bool,
        chars: Vec<u8>,
        ranges: Vec<(u8, u8)>,
    },
    Concat(Box<Ast>, Box<Ast>),
    Alt(Box<Ast>, Box<Ast>),
    Star(Box<Ast>),
    Plus(Box<Ast>),
    Question(Box<Ast>),
    /// `{min,max}` with `min >= 1`; `max == None` means unbounded. The parser
    /// rewrites every `min == 0` form before this node is built.
    Range {
        child: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
}

/// Printable ASCII, the range `.` and set negation operate over.
pub const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

impl Ast {
    /// Expand a `CharSet` node into the sorted concrete byte set. Returns an
    /// empty vector for sets that match nothing (the caller decides whether
    /// that is an error). Panics if called on any other variant.
    pub fn concrete_set(&self) -> Vec<u8> {
        let Ast::CharSet {
            negated,
            chars,
            ranges,
        } = self
        else {
            panic!("concrete_set on a non-CharSet node");
        };

        let mut member = [false; 256];
        for &c in chars {
            member[c as usize] = true;
        }
        for &(lo, hi) in ranges {
            for c in lo..=hi {
                member[c as usize] = true;
            }
        }

        if *negated {
            PRINTABLE.filter(|&b| !member[b as usize]).collect()
        } else {
            (0u16..256)
                .filter(|&b| member[b as usize])
                .map(|b| b as u8)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_expansion_sorts_and_dedups() {
        let ast = Ast::CharSet {
            negated: false,
            chars: vec![b'z', b'a', b'a'],
            ranges: vec![(b'b', b'd')],
        };
        assert_eq!(ast.concrete_set(), vec![b'a', b'b', b'c', b'd', b'z']);
    }

    #[test]
    fn negation_complements_within_printable() {
        let ast = Ast::CharSet {
            negated: true,
            chars: vec![b'a'],
            ranges: vec![],
        };
        let set = ast.concrete_set();
        assert_eq!(set.len(), 94);
        assert!(!set.contains(&b'a'));
        assert!(set.contains(&b' '));
        assert!(!set.contains(&b'\n'));
    }
}
