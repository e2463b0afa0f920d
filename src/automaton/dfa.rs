//! Subset construction: NFA to total DFA.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexSet;
use tracing::debug;

use super::{
    automaton::{Dfa, Nfa, Transition},
    symbol::{Label, StateId},
};

/// Epsilon closure of every state `0..=nfa.max_state()`, indexed by state.
///
/// Each closure is grown one epsilon hop at a time until a hop adds nothing,
/// so chains of epsilon edges are fully resolved.
pub fn epsilon_closures(nfa: &Nfa) -> Vec<BTreeSet<StateId>> {
    let mut epsilon_edges: HashMap<StateId, Vec<StateId>> = HashMap::new();
    for transition in &nfa.transitions {
        if transition.label == Label::Epsilon {
            epsilon_edges.entry(transition.from).or_default().push(transition.to);
        }
    }

    (0..=nfa.max_state())
        .map(|state| {
            let mut closure = BTreeSet::from([state]);

            loop {
                let hop: Vec<StateId> = closure
                    .iter()
                    .filter_map(|state| epsilon_edges.get(state))
                    .flatten()
                    .copied()
                    .filter(|next| !closure.contains(next))
                    .collect();

                if hop.is_empty() {
                    break closure;
                }

                closure.extend(hop);
            }
        })
        .collect()
}

/// Converts `nfa` into a DFA tagged with `tag`.
///
/// DFA states are sets of NFA states, numbered in breadth-first discovery
/// order with the initial closure as state 0. Every `(state, symbol)` edge is
/// recorded, including edges into the empty set, which then plays the role
/// of the trap state. A state is final iff its set holds the NFA's accepting
/// state.
pub fn build(nfa: &Nfa, tag: Option<&str>) -> Dfa {
    let closures = epsilon_closures(nfa);

    let mut symbol_edges: HashMap<(StateId, char), Vec<StateId>> = HashMap::new();
    for transition in &nfa.transitions {
        if let Label::Symbol(symbol) = transition.label {
            symbol_edges
                .entry((transition.from, symbol))
                .or_default()
                .push(transition.to);
        }
    }

    let mut discovered: IndexSet<BTreeSet<StateId>> = IndexSet::new();
    discovered.insert(closures[nfa.initial].clone());

    let mut transitions = vec![];
    let mut cursor = 0;

    while cursor < discovered.len() {
        let current = discovered[cursor].clone();

        for &symbol in &nfa.alphabet {
            let mut target = BTreeSet::new();
            for state in &current {
                if let Some(destinations) = symbol_edges.get(&(*state, symbol)) {
                    for destination in destinations {
                        target.extend(closures[*destination].iter().copied());
                    }
                }
            }

            let (next, _) = discovered.insert_full(target);
            transitions.push(Transition::symbol(cursor, symbol, next));
        }

        cursor += 1;
    }

    let finals: BTreeSet<StateId> = discovered
        .iter()
        .enumerate()
        .filter(|(_, set)| set.contains(&nfa.accepting))
        .map(|(id, _)| id)
        .collect();

    let sink = totalize(&mut transitions, discovered.len(), &nfa.alphabet);

    debug!(
        tag = tag.unwrap_or("<untagged>"),
        states = discovered.len() + usize::from(sink.is_some()),
        transitions = transitions.len(),
        finals = finals.len(),
        "built dfa"
    );

    Dfa::new(
        nfa.alphabet.clone(),
        transitions,
        0,
        finals,
        tag.map(String::from),
    )
}

/// Makes the transition function total over `0..state_count` and the
/// alphabet. If any pair is missing, a non-final sink with id `state_count`
/// is appended, every missing pair is routed to it and it loops to itself on
/// every symbol. Returns the sink id when one was added.
pub fn totalize(
    transitions: &mut Vec<Transition>,
    state_count: usize,
    alphabet: &BTreeSet<char>,
) -> Option<StateId> {
    let covered: HashSet<(StateId, char)> = transitions
        .iter()
        .filter_map(|transition| transition.label.symbol().map(|symbol| (transition.from, symbol)))
        .collect();

    let complete = (0..state_count)
        .all(|state| alphabet.iter().all(|symbol| covered.contains(&(state, *symbol))));
    if complete {
        return None;
    }

    let sink = state_count;
    for &symbol in alphabet {
        for state in 0..=sink {
            if !covered.contains(&(state, symbol)) {
                transitions.push(Transition::symbol(state, symbol, sink));
            }
        }
    }

    Some(sink)
}
