// src/codegen/tables.rs
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::automata::{ALPHABET_SIZE, Dfa};

/// Sentinel in the transition table for "no transition" (the dead state).
pub const NO_TRANSITION: i32 = -1;
/// Sentinel in the accept table for a non-accepting state.
pub const NO_TOKEN: i32 = -1;

/// The three artifacts the emitter embeds in generated source: a dense
/// `[num_states][128]` transition table, a per-state accept table holding
/// token-kind indices, and the token-kind names in specification order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerTables {
    #[serde_as(as = "Vec<[_; 128]>")]
    pub transition: Vec<[i32; ALPHABET_SIZE]>,
    pub accept: Vec<i32>,
    pub token_names: Vec<String>,
    pub start: u32,
}

impl ScannerTables {
    pub fn from_dfa(dfa: &Dfa, token_names: Vec<String>) -> Self {
        let mut transition = Vec::with_capacity(dfa.num_states());
        let mut accept = Vec::with_capacity(dfa.num_states());

        for state in 0..dfa.num_states() as u32 {
            let mut row = [NO_TRANSITION; ALPHABET_SIZE];
            for (byte, slot) in row.iter_mut().enumerate() {
                if let Some(next) = dfa.next_state(state, byte as u8) {
                    *slot = next as i32;
                }
            }
            transition.push(row);
            accept.push(dfa.accept_of(state).map_or(NO_TOKEN, |t| t as i32));
        }

        Self {
            transition,
            accept,
            token_names,
            start: dfa.start(),
        }
    }

    #[inline]
    pub fn num_states(&self) -> usize {
        self.transition.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::{determinize, minimize, thompson};
    use crate::regex::parser::parse;

    #[test]
    fn tables_mirror_the_dfa() {
        let frag = thompson::compile_pattern(&parse("ab").unwrap(), 0).unwrap();
        let dfa = minimize(&determinize(&thompson::merge_all(vec![frag])).unwrap()).unwrap();
        let tables = ScannerTables::from_dfa(&dfa, vec!["AB".into()]);

        assert_eq!(tables.num_states(), dfa.num_states());
        assert_eq!(tables.accept.len(), dfa.num_states());
        assert_eq!(tables.start, dfa.start());

        let mut state = tables.start as i32;
        for &b in b"ab" {
            state = tables.transition[state as usize][b as usize];
            assert_ne!(state, NO_TRANSITION);
        }
        assert_eq!(tables.accept[state as usize], 0);
        // No byte leaves the final accept state.
        assert!(
            tables.transition[state as usize]
                .iter()
                .all(|&t| t == NO_TRANSITION)
        );
    }
}
