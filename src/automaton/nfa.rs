//! Thompson's construction: expression tree to NFA.
//!
//! The builder threads a fresh-state counter through the recursion so that
//! sub-automata never share state ids. Every case yields exactly one
//! accepting state, and it is always the last id allocated.

use std::collections::BTreeSet;

use crate::ast::expression::Expression;

use super::{
    automaton::{Nfa, Transition},
    symbol::StateId,
};

/// Builds the NFA for `expr` using ids starting at `next_id`. Returns the
/// automaton together with the next unused id.
pub fn build(expr: &Expression, next_id: StateId) -> (Nfa, StateId) {
    match expr {
        Expression::Symbol(symbol) => {
            let initial = next_id;
            let accepting = next_id + 1;

            let nfa = Nfa {
                alphabet: BTreeSet::from([*symbol]),
                transitions: vec![Transition::symbol(initial, *symbol, accepting)],
                initial,
                accepting,
            };
            (nfa, next_id + 2)
        }
        Expression::Concat(left, right) => {
            let (first, next_id) = build(left, next_id);
            let (second, next_id) = build(right, next_id);

            let mut transitions = first.transitions;
            transitions.extend(second.transitions);
            transitions.push(Transition::epsilon(first.accepting, second.initial));

            let nfa = Nfa {
                alphabet: first.alphabet.union(&second.alphabet).copied().collect(),
                transitions,
                initial: first.initial,
                accepting: second.accepting,
            };
            (nfa, next_id)
        }
        Expression::Union(left, right) => {
            let (first, next_id) = build(left, next_id);
            let (second, next_id) = build(right, next_id);
            let initial = next_id;
            let accepting = next_id + 1;

            let mut transitions = first.transitions;
            transitions.extend(second.transitions);
            transitions.push(Transition::epsilon(initial, first.initial));
            transitions.push(Transition::epsilon(initial, second.initial));
            transitions.push(Transition::epsilon(first.accepting, accepting));
            transitions.push(Transition::epsilon(second.accepting, accepting));

            let nfa = Nfa {
                alphabet: first.alphabet.union(&second.alphabet).copied().collect(),
                transitions,
                initial,
                accepting,
            };
            (nfa, next_id + 2)
        }
        Expression::Star(inner) => {
            let (sub, next_id) = build(inner, next_id);
            let initial = next_id;
            let accepting = next_id + 1;

            let mut transitions = sub.transitions;
            transitions.push(Transition::epsilon(initial, sub.initial));
            transitions.push(Transition::epsilon(sub.accepting, accepting));
            transitions.push(Transition::epsilon(sub.accepting, sub.initial));
            transitions.push(Transition::epsilon(initial, accepting));

            let nfa = Nfa {
                alphabet: sub.alphabet,
                transitions,
                initial,
                accepting,
            };
            (nfa, next_id + 2)
        }
        // e+ is e followed by e*; the operand is built twice.
        Expression::Plus(inner) => {
            let expanded = Expression::concat(
                inner.as_ref().clone(),
                Expression::star(inner.as_ref().clone()),
            );
            build(&expanded, next_id)
        }
    }
}

/// Builds the NFA for `expr` with state ids starting at 0.
pub fn from_expression(expr: &Expression) -> Nfa {
    build(expr, 0).0
}
