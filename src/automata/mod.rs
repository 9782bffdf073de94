// src/automata/mod.rs
pub mod determinize;
pub mod dfa;
pub mod minimize;
pub mod nfa;
pub mod thompson;

pub use determinize::determinize;
pub use dfa::{ALPHABET_SIZE, Dfa};
pub use minimize::minimize;
pub use nfa::{Nfa, StateId, TokenId};
