use std::collections::{BTreeSet, HashMap};

use super::symbol::{Label, StateId};

/// A single labeled edge `from --label--> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    pub from: StateId,
    pub label: Label,
    pub to: StateId,
}

impl Transition {
    pub fn new(from: StateId, label: Label, to: StateId) -> Self {
        Transition { from, label, to }
    }

    pub fn epsilon(from: StateId, to: StateId) -> Self {
        Transition::new(from, Label::Epsilon, to)
    }

    pub fn symbol(from: StateId, symbol: char, to: StateId) -> Self {
        Transition::new(from, Label::Symbol(symbol), to)
    }
}

/// Behaviour shared by NFAs and DFAs. States are not allocated separately;
/// they exist by being referenced from transitions or the initial state.
pub trait Automaton {
    fn alphabet(&self) -> &BTreeSet<char>;
    fn transitions(&self) -> &[Transition];
    fn initial_state(&self) -> StateId;
    fn is_accepting(&self, state: StateId) -> bool;

    /// Whether the automaton accepts the whole of `input`.
    fn accepts(&self, input: &str) -> bool;

    fn states(&self) -> BTreeSet<StateId> {
        let mut states = BTreeSet::from([self.initial_state()]);
        for transition in self.transitions() {
            states.insert(transition.from);
            states.insert(transition.to);
        }
        states
    }
}

/// Nondeterministic automaton produced by Thompson's construction. It always
/// has exactly one accepting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub alphabet: BTreeSet<char>,
    pub transitions: Vec<Transition>,
    pub initial: StateId,
    pub accepting: StateId,
}

impl Nfa {
    /// Highest state id referenced anywhere in the automaton.
    pub fn max_state(&self) -> StateId {
        self.transitions
            .iter()
            .flat_map(|transition| [transition.from, transition.to])
            .chain([self.initial, self.accepting])
            .max()
            .unwrap_or(0)
    }

    /// Set of states reachable from `states` through epsilon edges only.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for transition in &self.transitions {
                if transition.from == state
                    && transition.label == Label::Epsilon
                    && closure.insert(transition.to)
                {
                    stack.push(transition.to);
                }
            }
        }

        closure
    }
}

impl Automaton for Nfa {
    fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn initial_state(&self) -> StateId {
        self.initial
    }

    fn is_accepting(&self, state: StateId) -> bool {
        state == self.accepting
    }

    fn accepts(&self, input: &str) -> bool {
        let mut current = self.epsilon_closure(&BTreeSet::from([self.initial]));

        for c in input.chars() {
            let reached: BTreeSet<StateId> = self
                .transitions
                .iter()
                .filter(|transition| {
                    transition.label == Label::Symbol(c) && current.contains(&transition.from)
                })
                .map(|transition| transition.to)
                .collect();

            if reached.is_empty() {
                return false;
            }

            current = self.epsilon_closure(&reached);
        }

        current.contains(&self.accepting)
    }
}

/// Deterministic automaton, optionally tagged with the rule it recognises.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: BTreeSet<char>,
    transitions: Vec<Transition>,
    table: HashMap<(StateId, char), StateId>,
    initial: StateId,
    finals: BTreeSet<StateId>,
    dead: BTreeSet<StateId>,
    tag: Option<String>,
}

impl Dfa {
    /// Builds a DFA from its parts. Epsilon edges are ignored when stepping;
    /// if a `(state, symbol)` pair occurs twice the first edge wins.
    pub fn new(
        alphabet: BTreeSet<char>,
        transitions: Vec<Transition>,
        initial: StateId,
        finals: BTreeSet<StateId>,
        tag: Option<String>,
    ) -> Self {
        let mut table = HashMap::with_capacity(transitions.len());
        for transition in &transitions {
            if let Label::Symbol(symbol) = transition.label {
                table.entry((transition.from, symbol)).or_insert(transition.to);
            }
        }

        let dead = dead_states(&table, initial, &finals);

        Dfa {
            alphabet,
            transitions,
            table,
            initial,
            finals,
            dead,
            tag,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    pub fn step(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.table.get(&(state, symbol)).copied()
    }

    /// Whether no final state can be reached from `state`.
    pub fn is_dead(&self, state: StateId) -> bool {
        self.dead.contains(&state)
    }

    /// Number of distinct states that appear in the transition list.
    pub fn state_count(&self) -> usize {
        self.transitions
            .iter()
            .flat_map(|transition| [transition.from, transition.to])
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether every state has exactly one edge per alphabet symbol.
    pub fn is_total(&self) -> bool {
        let states = self.states();
        let mut seen: HashMap<(StateId, char), usize> = HashMap::new();
        for transition in &self.transitions {
            if let Label::Symbol(symbol) = transition.label {
                *seen.entry((transition.from, symbol)).or_default() += 1;
            }
        }

        states.iter().all(|state| {
            self.alphabet
                .iter()
                .all(|symbol| seen.get(&(*state, *symbol)) == Some(&1))
        })
    }

    /// Length of the longest prefix of `input` this DFA accepts, 0 if none.
    ///
    /// Single left-to-right run recording the last accepting position; this
    /// gives the same answer as testing every prefix from the initial state
    /// because the automaton is deterministic. The run stops at the first
    /// dead state, so the trap state never drags it to the end of the input.
    pub fn longest_match(&self, input: &[char]) -> usize {
        let mut state = self.initial;
        let mut longest = 0;

        for (index, c) in input.iter().enumerate() {
            match self.step(state, *c) {
                Some(next) if !self.is_dead(next) => state = next,
                _ => break,
            }

            if self.is_accepting(state) {
                longest = index + 1;
            }
        }

        longest
    }
}

impl Automaton for Dfa {
    fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn initial_state(&self) -> StateId {
        self.initial
    }

    fn is_accepting(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    fn accepts(&self, input: &str) -> bool {
        let mut state = self.initial;

        for c in input.chars() {
            match self.step(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.finals.contains(&state)
    }
}

/// States referenced by `table` (plus `initial`) from which no final state is
/// reachable, found by walking the step table backwards from the finals.
fn dead_states(
    table: &HashMap<(StateId, char), StateId>,
    initial: StateId,
    finals: &BTreeSet<StateId>,
) -> BTreeSet<StateId> {
    let mut predecessors: HashMap<StateId, Vec<StateId>> = HashMap::new();
    let mut states = BTreeSet::from([initial]);
    for (&(from, _), &to) in table {
        predecessors.entry(to).or_default().push(from);
        states.insert(from);
        states.insert(to);
    }

    let mut live: BTreeSet<StateId> = finals.clone();
    let mut stack: Vec<StateId> = finals.iter().copied().collect();
    while let Some(state) = stack.pop() {
        for &from in predecessors.get(&state).into_iter().flatten() {
            if live.insert(from) {
                stack.push(from);
            }
        }
    }

    states.difference(&live).copied().collect()
}
