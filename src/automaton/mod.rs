//! Finite automata: the shared model, Thompson's construction, subset
//! construction and the text formats used to dump and reload DFAs.

pub mod automaton;
pub mod dfa;
pub mod nfa;
pub mod serialize;
pub mod symbol;

#[cfg(test)]
mod tests;
