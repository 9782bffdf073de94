// src/automata/thompson.rs
// Thompson construction: one NFA fragment per syntax-tree node, each with a
// single entry state and one or more accept states. Combinators are pure
// builders that consume their operands and return a new fragment; stitching
// is a handful of ε-transitions, so each combinator is O(states copied).

use super::nfa::{Nfa, TokenId};
use crate::error::{Error, Result};
use crate::regex::ast::{Ast, PRINTABLE};

/// Compile one user pattern and stamp `tag` on every accept state, replacing
/// the placeholder the combinators build with.
pub fn compile_pattern(ast: &Ast, tag: TokenId) -> Result<Nfa> {
    let mut nfa = compile(ast)?;
    nfa.retag_accepts(tag);
    Ok(nfa)
}

/// Compile a syntax tree into a fragment. All accept states carry the
/// placeholder tag 0 until [`compile_pattern`] rewrites them.
pub fn compile(ast: &Ast) -> Result<Nfa> {
    Ok(match ast {
        Ast::Char(b) => symbol_set(&[*b]),
        Ast::Dot => symbol_set(&PRINTABLE.collect::<Vec<u8>>()),
        Ast::CharSet { .. } => {
            let set = ast.concrete_set();
            if set.is_empty() {
                // The parser rejects these up front; this is the backstop.
                return Err(Error::RegexSemantic {
                    position: 0,
                    message: "character set matches no byte".into(),
                });
            }
            symbol_set(&set)
        }
        Ast::Concat(l, r) => concat(compile(l)?, compile(r)?),
        Ast::Alt(l, r) => alternate(compile(l)?, compile(r)?),
        Ast::Star(c) => star(compile(c)?),
        Ast::Plus(c) => plus(compile(c)?),
        Ast::Question(c) => question(compile(c)?),
        Ast::Range { child, min, max } => repeat(&compile(child)?, *min, *max),
    })
}

/// Two states `0 --b--> 1` with one parallel transition per byte; 1 accepts.
fn symbol_set(bytes: &[u8]) -> Nfa {
    let mut nfa = Nfa::with_states(2);
    for &b in bytes {
        nfa.add_transition(0, b, 1);
    }
    nfa.set_accept(1, 0);
    nfa
}

/// Append `right` after `left`: renumber `right` by `left`'s state count,
/// drop `left`'s accepts and ε-connect each of them to `right`'s entry.
/// The composite accepts exactly where (renumbered) `right` accepted.
pub fn concat(left: Nfa, right: Nfa) -> Nfa {
    let mut out = left;
    let offset = out.num_states() as u32;
    for _ in 0..right.num_states() {
        out.add_state();
    }

    let left_accepts = out.clear_accepts();
    out.copy_structure_from(&right, offset);

    for (&state, _) in left_accepts.iter() {
        out.add_epsilon(state, right.start() + offset);
    }
    for (&state, &tag) in right.accepts() {
        out.set_accept(state + offset, tag);
    }
    out
}

/// Fresh start that ε-branches into both operands; accepts are the union.
pub fn alternate(left: Nfa, right: Nfa) -> Nfa {
    let left_n = left.num_states() as u32;
    let right_offset = 1 + left_n;
    let mut out = Nfa::with_states(1 + left.num_states() + right.num_states());

    out.copy_structure_from(&left, 1);
    out.copy_structure_from(&right, right_offset);
    out.add_epsilon(0, left.start() + 1);
    out.add_epsilon(0, right.start() + right_offset);

    for (&state, &tag) in left.accepts() {
        out.set_accept(state + 1, tag);
    }
    for (&state, &tag) in right.accepts() {
        out.set_accept(state + right_offset, tag);
    }
    out
}

/// Kleene star: the entry also accepts (the empty iteration), and every
/// accept loops back to the entry. Adding the entry to the accept set is
/// idempotent when the fragment already accepts there.
pub fn star(nfa: Nfa) -> Nfa {
    let mut out = close_over_start(nfa);
    let tag = fragment_tag(&out);
    out.set_accept(out.start(), tag);
    out
}

/// `+` is `*` without the empty iteration: loop back, entry stays non-accepting.
pub fn plus(nfa: Nfa) -> Nfa {
    close_over_start(nfa)
}

/// `?` marks the entry accepting; no loop-back edge.
pub fn question(nfa: Nfa) -> Nfa {
    let mut out = nfa;
    let tag = fragment_tag(&out);
    out.set_accept(out.start(), tag);
    out
}

/// `{min,max}` with `min >= 1`: `min` cloned copies in sequence, then either
/// a star (unbounded) or `max - min` optional copies.
pub fn repeat(fragment: &Nfa, min: u32, max: Option<u32>) -> Nfa {
    debug_assert!(min >= 1, "parser rewrites min=0 before Thompson");

    let mut out = fragment.clone();
    for _ in 1..min {
        out = concat(out, fragment.clone());
    }
    match max {
        None => concat(out, star(fragment.clone())),
        Some(max) => {
            for _ in min..max {
                out = concat(out, question(fragment.clone()));
            }
            out
        }
    }
}

/// Ordered per-pattern fragments into one ε-NFA: a fresh start state 0 that
/// ε-branches to every fragment's entry. Accept entries keep the token tags
/// stamped by [`compile_pattern`].
pub fn merge_all(fragments: Vec<Nfa>) -> Nfa {
    debug_assert!(!fragments.is_empty());

    let total: usize = 1 + fragments.iter().map(Nfa::num_states).sum::<usize>();
    let mut out = Nfa::with_states(total);

    let mut offset: u32 = 1;
    for fragment in &fragments {
        out.copy_structure_from(fragment, offset);
        out.add_epsilon(0, fragment.start() + offset);
        for (&state, &tag) in fragment.accepts() {
            out.set_accept(state + offset, tag);
        }
        offset += fragment.num_states() as u32;
    }
    out
}

/// ε-edge from every accept back to the entry (shared tail of `*` and `+`).
fn close_over_start(nfa: Nfa) -> Nfa {
    let mut out = nfa;
    let start = out.start();
    let accept_states: Vec<u32> = out.accepts().keys().copied().collect();
    for state in accept_states {
        if state != start {
            out.add_epsilon(state, start);
        }
    }
    out
}

/// The single tag a fragment's accepts carry (0 for untagged fragments).
fn fragment_tag(nfa: &Nfa) -> TokenId {
    nfa.accepts().values().next().copied().unwrap_or(0)
}
