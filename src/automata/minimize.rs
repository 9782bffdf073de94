// src/automata/minimize.rs
// Partition refinement constrained by accept tags: the initial partition has
// one block per distinct winning token kind plus one block of non-accepting
// states, so states tagged with different tokens can never merge. Blocks
// only ever split, which bounds the refinement loop.

use hashbrown::HashMap;

use super::dfa::Dfa;
use super::nfa::StateId;
use crate::error::{Error, Result};

const NO_BLOCK: usize = usize::MAX;

/// States reachable from the start via byte transitions, ascending.
fn reachable_states(dfa: &Dfa) -> Vec<StateId> {
    let mut seen = vec![false; dfa.num_states()];
    let mut stack = vec![dfa.start()];
    seen[dfa.start() as usize] = true;

    while let Some(s) = stack.pop() {
        for &b in dfa.alphabet() {
            if let Some(t) = dfa.next_state(s, b) {
                if !seen[t as usize] {
                    seen[t as usize] = true;
                    stack.push(t);
                }
            }
        }
    }

    (0..dfa.num_states() as StateId)
        .filter(|&s| seen[s as usize])
        .collect()
}

/// Group `states` (iterated in the given order) by `key`, assigning group
/// indices in first-encounter order so the result is deterministic.
fn group_in_order<K: std::hash::Hash + Eq>(
    states: &[StateId],
    mut key: impl FnMut(StateId) -> K,
) -> Vec<Vec<StateId>> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<StateId>> = Vec::new();
    for &s in states {
        let k = key(s);
        let i = *index.entry(k).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[i].push(s);
    }
    groups
}

pub fn minimize(dfa: &Dfa) -> Result<Dfa> {
    if dfa.num_states() == 0 {
        return Err(Error::EmptyLanguage);
    }

    // Dead states would otherwise survive as their own block.
    let reachable = reachable_states(dfa);

    // One block per accept tag; None groups the non-accepting states.
    let mut blocks = group_in_order(&reachable, |s| dfa.accept_of(s));
    let alphabet: Vec<u8> = dfa.alphabet().iter().copied().collect();

    let mut block_of = vec![NO_BLOCK; dfa.num_states()];
    loop {
        for (i, block) in blocks.iter().enumerate() {
            for &s in block {
                block_of[s as usize] = i;
            }
        }

        // Split every block by the byte-wise signature of its members: for
        // each alphabet byte, which block the transition lands in (NO_BLOCK
        // stands for the dead state).
        let mut next: Vec<Vec<StateId>> = Vec::new();
        let mut changed = false;
        for block in &blocks {
            let groups = group_in_order(block, |s| {
                alphabet
                    .iter()
                    .map(|&b| match dfa.next_state(s, b) {
                        Some(t) => block_of[t as usize],
                        None => NO_BLOCK,
                    })
                    .collect::<Vec<usize>>()
            });
            if groups.len() > 1 {
                changed = true;
            }
            next.extend(groups);
        }

        blocks = next;
        if !changed {
            break;
        }
    }

    for (i, block) in blocks.iter().enumerate() {
        for &s in block {
            block_of[s as usize] = i;
        }
    }

    // One minimized state per block. All members agree on tag and on
    // block-target per byte, so the first member serves as representative.
    let mut out = Dfa::new(dfa.alphabet().clone());
    for block in &blocks {
        let id = out.add_state();
        if let Some(tag) = dfa.accept_of(block[0]) {
            out.set_accept(id, tag);
        }
    }
    for (i, block) in blocks.iter().enumerate() {
        let rep = block[0];
        for &b in dfa.alphabet() {
            if let Some(t) = dfa.next_state(rep, b) {
                out.set_transition(i as StateId, b, block_of[t as usize] as StateId);
            }
        }
    }
    out.set_start(block_of[dfa.start() as usize] as StateId);

    log::debug!(
        "minimize: {} states -> {} states ({} unreachable dropped)",
        dfa.num_states(),
        out.num_states(),
        dfa.num_states() - reachable.len()
    );
    Ok(out)
}
