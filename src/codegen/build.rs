// src/codegen/build.rs
// Front-to-back table construction: patterns -> tagged fragments -> one
// merged ε-NFA -> DFA -> minimized DFA -> dense tables. Per-pattern
// compilation is embarrassingly parallel; everything after the merge is
// sequential and deterministic.

use rayon::prelude::*;

use super::tables::ScannerTables;
use crate::automata::{Nfa, TokenId, determinize, minimize, thompson};
use crate::error::{Error, Result};
use crate::regex;
use crate::spec::TokenDef;

/// Compile every definition to its tagged ε-NFA fragment, in spec order.
/// The fragment at index `i` carries tag `i`.
pub fn compile_fragments(defs: &[TokenDef]) -> Result<Vec<Nfa>> {
    defs.par_iter()
        .enumerate()
        .map(|(i, def)| {
            let ast = regex::parse(&def.pattern).map_err(|e| e.in_pattern(&def.name))?;
            let nfa = thompson::compile_pattern(&ast, i as TokenId)
                .map_err(|e| e.in_pattern(&def.name))?;
            if nfa.alphabet().is_empty() {
                return Err(Error::EmptyAlphabet {
                    token: def.name.clone(),
                });
            }
            Ok(nfa)
        })
        .collect()
}

/// Run the whole pipeline for an ordered definition list.
pub fn build_tables(defs: &[TokenDef]) -> Result<ScannerTables> {
    let fragments = compile_fragments(defs)?;
    let merged = thompson::merge_all(fragments);
    log::debug!(
        "merged {} patterns into {} NFA states",
        defs.len(),
        merged.num_states()
    );

    let dfa = determinize(&merged)?;
    let minimized = minimize(&dfa)?;

    let names = defs.iter().map(|d| d.name.clone()).collect();
    Ok(ScannerTables::from_dfa(&minimized, names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_spec;

    #[test]
    fn fragment_tags_follow_definition_order() {
        let defs = parse_spec("A ::= \"a\"\nB ::= \"b\"\nC ::= \"c\"").unwrap();
        let fragments = compile_fragments(&defs).unwrap();
        for (i, frag) in fragments.iter().enumerate() {
            assert!(frag.accepts().values().all(|&t| t == i as TokenId));
        }
    }

    #[test]
    fn bad_pattern_names_its_token() {
        let defs = parse_spec("GOOD ::= \"a\"\nBAD ::= \"(\"").unwrap();
        let err = compile_fragments(&defs).unwrap_err();
        match err {
            Error::RegexSyntax { message, .. } => assert!(message.contains("BAD")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
