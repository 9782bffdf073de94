// src/automata/determinize.rs
// Subset construction. Every DFA state stands for a set of ε-NFA states,
// canonicalized as a sorted ID vector so it can key the interning map.
// Alphabet bytes are visited in ascending order and accept ties resolve to
// the smallest token index, which keeps the whole stage deterministic.

use std::collections::VecDeque;

use hashbrown::HashMap;

use super::dfa::{ALPHABET_SIZE, Dfa};
use super::nfa::{Nfa, StateId, TokenId};
use crate::error::{Error, Result};

/// ε-closure of `seed`: BFS over ε-edges only. Returns sorted state IDs.
pub fn eps_closure(nfa: &Nfa, seed: &[StateId]) -> Vec<StateId> {
    let mut in_closure = vec![false; nfa.num_states()];
    let mut queue: VecDeque<StateId> = VecDeque::new();

    for &s in seed {
        if !in_closure[s as usize] {
            in_closure[s as usize] = true;
            queue.push_back(s);
        }
    }
    while let Some(s) = queue.pop_front() {
        for &t in nfa.epsilon_targets(s) {
            if !in_closure[t as usize] {
                in_closure[t as usize] = true;
                queue.push_back(t);
            }
        }
    }

    (0..nfa.num_states() as StateId)
        .filter(|&s| in_closure[s as usize])
        .collect()
}

/// `move(T, b)`: ε-closure of the states reachable from `T` by one `b`-edge.
fn move_set(nfa: &Nfa, set: &[StateId], byte: u8) -> Vec<StateId> {
    let mut step: Vec<StateId> = Vec::new();
    for &s in set {
        step.extend_from_slice(nfa.byte_targets(s, byte));
    }
    if step.is_empty() {
        return step;
    }
    eps_closure(nfa, &step)
}

/// Winning tag for a superstate: the smallest token index among the NFA
/// accepts it contains, i.e. the first pattern in the specification.
fn winning_tag(nfa: &Nfa, set: &[StateId]) -> Option<TokenId> {
    set.iter().filter_map(|&s| nfa.accept_of(s)).min()
}

pub fn determinize(nfa: &Nfa) -> Result<Dfa> {
    if nfa.alphabet().is_empty() {
        return Err(Error::EmptyAlphabet {
            token: "<merged>".into(),
        });
    }

    let mut dfa = Dfa::new(nfa.alphabet().clone());
    let mut interned: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut worklist: VecDeque<Vec<StateId>> = VecDeque::new();

    let start_set = eps_closure(nfa, &[nfa.start()]);
    let q0 = dfa.add_state();
    if let Some(tag) = winning_tag(nfa, &start_set) {
        dfa.set_accept(q0, tag);
    }
    interned.insert(start_set.clone(), q0);
    worklist.push_back(start_set);

    while let Some(current) = worklist.pop_front() {
        let from = interned[&current];

        for &byte in nfa.alphabet() {
            // Bytes outside the table width can never be matched; the regex
            // scanner rejects them, and any that slip through stay unmatched.
            if (byte as usize) >= ALPHABET_SIZE {
                continue;
            }
            let next = move_set(nfa, &current, byte);
            if next.is_empty() {
                continue;
            }

            let to = match interned.get(&next) {
                Some(&id) => id,
                None => {
                    let id = dfa.add_state();
                    if let Some(tag) = winning_tag(nfa, &next) {
                        dfa.set_accept(id, tag);
                    }
                    interned.insert(next.clone(), id);
                    worklist.push_back(next);
                    id
                }
            };
            dfa.set_transition(from, byte, to);
        }
    }

    log::debug!(
        "determinize: {} NFA states -> {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::thompson::{compile_pattern, merge_all};
    use crate::regex::parser::parse;

    fn dfa_for(patterns: &[&str]) -> Dfa {
        let fragments = patterns
            .iter()
            .enumerate()
            .map(|(i, p)| compile_pattern(&parse(p).unwrap(), i as TokenId).unwrap())
            .collect();
        determinize(&merge_all(fragments)).unwrap()
    }

    #[test]
    fn closure_follows_epsilon_chains() {
        let mut nfa = Nfa::with_states(4);
        nfa.add_epsilon(0, 1);
        nfa.add_epsilon(1, 2);
        nfa.add_transition(2, b'x', 3);
        assert_eq!(eps_closure(&nfa, &[0]), vec![0, 1, 2]);
    }

    #[test]
    fn single_pattern_acceptance() {
        let dfa = dfa_for(&["ab*"]);
        assert_eq!(dfa.accepts_input(b"a"), Some(0));
        assert_eq!(dfa.accepts_input(b"abbb"), Some(0));
        assert_eq!(dfa.accepts_input(b"b"), None);
        assert_eq!(dfa.accepts_input(b""), None);
    }

    #[test]
    fn earlier_pattern_wins_ties() {
        // Both patterns accept exactly "if"; the first must win.
        let dfa = dfa_for(&["if", "[a-z]+"]);
        assert_eq!(dfa.accepts_input(b"if"), Some(0));
        assert_eq!(dfa.accepts_input(b"ifx"), Some(1));
        assert_eq!(dfa.accepts_input(b"x"), Some(1));
    }

    #[test]
    fn ordering_swap_flips_winner() {
        let dfa = dfa_for(&["[a-z]+", "if"]);
        assert_eq!(dfa.accepts_input(b"if"), Some(0));
    }

    #[test]
    fn empty_alphabet_is_an_error() {
        // A state with no byte transitions at all has nothing to determinize.
        let nfa = Nfa::with_states(1);
        assert!(matches!(
            determinize(&nfa),
            Err(crate::error::Error::EmptyAlphabet { .. })
        ));
    }

    #[test]
    fn out_of_range_alphabet_bytes_stay_unmatched() {
        let mut nfa = Nfa::with_states(3);
        nfa.add_transition(0, b'a', 1);
        nfa.add_transition(0, 0xC3, 2);
        nfa.set_accept(1, 0);
        nfa.set_accept(2, 0);

        let dfa = determinize(&nfa).unwrap();
        assert_eq!(dfa.accepts_input(b"a"), Some(0));
        assert_eq!(dfa.accepts_input(&[0xC3]), None);
    }

    #[test]
    fn transitions_stay_in_range() {
        let dfa = dfa_for(&["[a-c]([x-z]|[0-9])*", "abc"]);
        for s in 0..dfa.num_states() as StateId {
            for b in 0u8..128 {
                if let Some(t) = dfa.next_state(s, b) {
                    assert!((t as usize) < dfa.num_states());
                }
            }
        }
    }
}
