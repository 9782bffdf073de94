// src/automata/nfa.rs
use std::collections::BTreeSet;

use hashbrown::HashMap;

pub type StateId = u32;

/// Index of a token kind in specification order. Smaller is higher priority;
/// this is the tie-breaker when several patterns accept the same lexeme.
pub type TokenId = u32;

/// ε-NFA with integer state IDs into flat per-state tables. Automata are
/// naturally cyclic, so nothing here owns anything by pointer; transitions,
/// ε-edges and accept tags are all keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Nfa {
    trans: Vec<HashMap<u8, Vec<StateId>>>,
    epsilon: Vec<Vec<StateId>>,
    start: StateId,
    accepts: HashMap<StateId, TokenId>,
    alphabet: BTreeSet<u8>,
}

impl Nfa {
    /// An NFA with `n` fresh states, no transitions, start state 0.
    pub fn with_states(n: usize) -> Self {
        Self {
            trans: vec![HashMap::new(); n],
            epsilon: vec![Vec::new(); n],
            start: 0,
            accepts: HashMap::new(),
            alphabet: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn num_states(&self) -> usize {
        self.trans.len()
    }

    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn add_state(&mut self) -> StateId {
        self.trans.push(HashMap::new());
        self.epsilon.push(Vec::new());
        (self.trans.len() - 1) as StateId
    }

    pub fn add_transition(&mut self, from: StateId, byte: u8, to: StateId) {
        debug_assert!((from as usize) < self.trans.len());
        debug_assert!((to as usize) < self.trans.len());
        self.trans[from as usize].entry(byte).or_default().push(to);
        self.alphabet.insert(byte);
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        debug_assert!((from as usize) < self.epsilon.len());
        debug_assert!((to as usize) < self.epsilon.len());
        self.epsilon[from as usize].push(to);
    }

    #[inline]
    pub fn byte_targets(&self, state: StateId, byte: u8) -> &[StateId] {
        self.trans[state as usize]
            .get(&byte)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn epsilon_targets(&self, state: StateId) -> &[StateId] {
        &self.epsilon[state as usize]
    }

    /// Bytes with at least one outgoing transition from `state`, ascending.
    pub fn symbols(&self, state: StateId) -> Vec<u8> {
        let mut out: Vec<u8> = self.trans[state as usize].keys().copied().collect();
        out.sort_unstable();
        out
    }

    #[inline]
    pub fn alphabet(&self) -> &BTreeSet<u8> {
        &self.alphabet
    }

    #[inline]
    pub fn accepts(&self) -> &HashMap<StateId, TokenId> {
        &self.accepts
    }

    #[inline]
    pub fn accept_of(&self, state: StateId) -> Option<TokenId> {
        self.accepts.get(&state).copied()
    }

    #[inline]
    pub fn is_accept(&self, state: StateId) -> bool {
        self.accepts.contains_key(&state)
    }

    /// Mark `state` accepting with `tag`. Idempotent for an existing entry
    /// with the same tag; a fragment never carries two different tags.
    pub fn set_accept(&mut self, state: StateId, tag: TokenId) {
        debug_assert!((state as usize) < self.trans.len());
        self.accepts.insert(state, tag);
    }

    pub fn clear_accepts(&mut self) -> HashMap<StateId, TokenId> {
        std::mem::take(&mut self.accepts)
    }

    /// Rewrite every accept entry to `tag`. Used once per user pattern to
    /// replace the placeholder tag the combinators build with.
    pub fn retag_accepts(&mut self, tag: TokenId) {
        for t in self.accepts.values_mut() {
            *t = tag;
        }
    }

    /// Copy `src`'s transition structure into `self` with all state IDs
    /// shifted by `offset`. Accept entries are NOT copied; each composer
    /// decides what happens to them. `self` must already contain the
    /// destination states.
    pub fn copy_structure_from(&mut self, src: &Nfa, offset: StateId) {
        for from in 0..src.num_states() as StateId {
            for (&byte, targets) in &src.trans[from as usize] {
                for &to in targets {
                    self.add_transition(from + offset, byte, to + offset);
                }
            }
            for &to in src.epsilon_targets(from) {
                self.add_epsilon(from + offset, to + offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_structure_offsets_everything() {
        let mut src = Nfa::with_states(2);
        src.add_transition(0, b'x', 1);
        src.add_epsilon(1, 0);

        let mut dst = Nfa::with_states(5);
        dst.copy_structure_from(&src, 3);

        assert_eq!(dst.byte_targets(3, b'x'), &[4]);
        assert_eq!(dst.epsilon_targets(4), &[3]);
        assert!(dst.alphabet().contains(&b'x'));
    }
}
