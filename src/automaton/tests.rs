//! Unit tests for automaton construction and serialization.

use std::collections::BTreeSet;

use super::{
    automaton::{Automaton, Dfa, Nfa, Transition},
    dfa::{self, epsilon_closures, totalize},
    nfa,
    serialize::{parse_persisted, to_persisted},
    symbol::{parse_symbols, render_symbol, Label},
};
use crate::{ast::expression::Expression, parser::parser::parse_regex};

fn sym(c: char) -> Expression {
    Expression::Symbol(c)
}

fn dfa_for(pattern: &str, tag: &str) -> Dfa {
    let nfa = nfa::from_expression(&parse_regex(pattern).unwrap());
    dfa::build(&nfa, Some(tag))
}

#[test]
fn test_symbol_rendering() {
    assert_eq!(render_symbol('a'), "a");
    assert_eq!(render_symbol('\n'), "\\n");
    assert_eq!(render_symbol('\t'), "\\t");
    assert_eq!(render_symbol('\\'), "\\\\");
    assert_eq!(parse_symbols("ab\\n\\\\"), Some(vec!['a', 'b', '\n', '\\']));
    assert_eq!(parse_symbols("a\\"), None);
    assert_eq!(parse_symbols("\\q"), None);
}

#[test]
fn test_thompson_symbol() {
    let (nfa, next) = nfa::build(&sym('a'), 0);

    assert_eq!(next, 2);
    assert_eq!(nfa.initial, 0);
    assert_eq!(nfa.accepting, 1);
    assert_eq!(nfa.transitions, vec![Transition::symbol(0, 'a', 1)]);
    assert_eq!(nfa.alphabet, BTreeSet::from(['a']));
}

#[test]
fn test_thompson_counter_growth() {
    let cases = vec![
        (sym('a'), 2),
        (Expression::concat(sym('a'), sym('b')), 4),
        (Expression::union(sym('a'), sym('b')), 6),
        (Expression::star(sym('a')), 4),
        (Expression::plus(sym('a')), 6),
        (Expression::plus(Expression::union(sym('a'), sym('b'))), 6 + 8),
    ];

    for (expr, expected) in cases {
        let (nfa, next) = nfa::build(&expr, 10);
        assert_eq!(next, 10 + expected, "counter for {}", expr);
        assert_eq!(nfa.accepting, next - 1, "accepting state for {}", expr);
    }
}

#[test]
fn test_thompson_concat_links_with_epsilon() {
    let (nfa, _) = nfa::build(&Expression::concat(sym('a'), sym('b')), 0);

    assert_eq!(nfa.initial, 0);
    assert_eq!(nfa.accepting, 3);
    assert!(nfa.transitions.contains(&Transition::epsilon(1, 2)));
    assert_eq!(nfa.alphabet, BTreeSet::from(['a', 'b']));
}

#[test]
fn test_thompson_star_edges() {
    let (nfa, _) = nfa::build(&Expression::star(sym('a')), 0);

    assert_eq!(nfa.initial, 2);
    assert_eq!(nfa.accepting, 3);
    for edge in [(2, 0), (1, 3), (1, 0), (2, 3)] {
        assert!(nfa.transitions.contains(&Transition::epsilon(edge.0, edge.1)));
    }
}

#[test]
fn test_nfa_simulation() {
    let nfa = nfa::from_expression(&parse_regex("(ab)*c").unwrap());

    assert!(nfa.accepts("c"));
    assert!(nfa.accepts("ababc"));
    assert!(!nfa.accepts("abc_"));
    assert!(!nfa.accepts("aba"));
    assert!(!nfa.accepts(""));
}

#[test]
fn test_epsilon_closures_follow_chains() {
    let nfa = nfa::from_expression(&Expression::star(sym('a')));
    let closures = epsilon_closures(&nfa);

    assert_eq!(closures.len(), 4);
    assert_eq!(closures[0], BTreeSet::from([0]));
    assert_eq!(closures[1], BTreeSet::from([0, 1, 3]));
    assert_eq!(closures[2], BTreeSet::from([0, 2, 3]));
    assert_eq!(closures[3], BTreeSet::from([3]));
}

#[test]
fn test_epsilon_closure_long_chain() {
    let nfa = Nfa {
        alphabet: BTreeSet::from(['a']),
        transitions: vec![
            Transition::epsilon(0, 1),
            Transition::epsilon(1, 2),
            Transition::epsilon(2, 3),
            Transition::symbol(3, 'a', 4),
        ],
        initial: 0,
        accepting: 4,
    };

    assert_eq!(epsilon_closures(&nfa)[0], BTreeSet::from([0, 1, 2, 3]));
}

#[test]
fn test_subset_construction_symbol() {
    let dfa = dfa_for("a", "A");

    assert_eq!(dfa.tag(), Some("A"));
    assert_eq!(dfa.initial_state(), 0);
    assert_eq!(dfa.final_states(), &BTreeSet::from([1]));
    assert_eq!(
        dfa.transitions(),
        &[
            Transition::symbol(0, 'a', 1),
            Transition::symbol(1, 'a', 2),
            Transition::symbol(2, 'a', 2),
        ]
    );
    assert!(dfa.is_total());
}

#[test]
fn test_subset_construction_star() {
    let dfa = dfa_for("a*", "A");

    assert_eq!(dfa.final_states(), &BTreeSet::from([0, 1]));
    assert_eq!(
        dfa.transitions(),
        &[Transition::symbol(0, 'a', 1), Transition::symbol(1, 'a', 1)]
    );
    assert!(dfa.accepts(""));
    assert!(dfa.accepts("aaaa"));
}

#[test]
fn test_subset_construction_is_total() {
    for pattern in ["a", "ab|c", "(a|b)*abb", "x+y*", "('\\n'|' ')+"] {
        let dfa = dfa_for(pattern, "T");
        assert!(dfa.is_total(), "{} is not total", pattern);
        assert!(dfa.transitions().iter().all(|t| t.label != Label::Epsilon));
    }
}

#[test]
fn test_subset_construction_is_deterministic() {
    let first = dfa_for("(a|b)*abb", "T");
    let second = dfa_for("(a|b)*abb", "T");

    assert_eq!(first.transitions(), second.transitions());
    assert_eq!(first.final_states(), second.final_states());
}

#[test]
fn test_dfa_matches_nfa() {
    let nfa = nfa::from_expression(&parse_regex("(a|b)*abb").unwrap());
    let dfa = dfa::build(&nfa, None);

    for word in ["abb", "aabb", "babb", "ab", "", "abba", "bbbabb"] {
        assert_eq!(dfa.accepts(word), nfa.accepts(word), "disagree on {:?}", word);
    }
}

#[test]
fn test_longest_match() {
    let dfa = dfa_for("ab*", "T");
    let input: Vec<char> = "abbbc".chars().collect();

    assert_eq!(dfa.longest_match(&input), 4);
    assert_eq!(dfa.longest_match(&['b']), 0);
    assert_eq!(dfa.longest_match(&[]), 0);
}

#[test]
fn test_trap_state_is_dead() {
    let dfa = dfa_for("a", "A");

    // 0 --a--> 1 --a--> 2, and 2 is the empty-set trap.
    assert!(!dfa.is_dead(0));
    assert!(!dfa.is_dead(1));
    assert!(dfa.is_dead(2));
    assert!(dfa.is_accepting(1));
}

#[test]
fn test_longest_match_stops_at_dead_state() {
    let dfa = dfa_for("a", "A");
    let input: Vec<char> = "a".repeat(100_000).chars().collect();

    let start = std::time::Instant::now();
    for offset in 0..input.len() {
        assert_eq!(dfa.longest_match(&input[offset..]), 1);
    }
    assert!(start.elapsed() < std::time::Duration::from_secs(5));
}

#[test]
fn test_totalize_adds_sink() {
    let mut transitions = vec![Transition::symbol(0, 'a', 1)];
    let alphabet = BTreeSet::from(['a', 'b']);

    let sink = totalize(&mut transitions, 2, &alphabet);

    assert_eq!(sink, Some(2));
    assert_eq!(transitions.len(), 6);
    assert!(transitions.contains(&Transition::symbol(2, 'a', 2)));
    assert!(transitions.contains(&Transition::symbol(2, 'b', 2)));
    assert!(transitions.contains(&Transition::symbol(1, 'a', 2)));

    let dfa = Dfa::new(alphabet, transitions, 0, BTreeSet::from([1]), None);
    assert!(dfa.is_total());
}

#[test]
fn test_totalize_leaves_complete_dfa_alone() {
    let mut transitions = vec![Transition::symbol(0, 'a', 0)];

    assert_eq!(totalize(&mut transitions, 1, &BTreeSet::from(['a'])), None);
    assert_eq!(transitions.len(), 1);
}

#[test]
fn test_dump_format() {
    let dfa = dfa_for("a", "A");

    assert_eq!(dfa.to_string(), "A\na\n3\n0\n1 \n0,'a',1\n1,'a',2\n2,'a',2");
}

#[test]
fn test_persisted_round_trip() {
    let dfas = vec![dfa_for("('\\n'|' ')+", "WS"), dfa_for("(a|b)*abb", "ABB")];
    let text = to_persisted(&dfas);
    let reloaded = parse_persisted(&text).unwrap();

    assert_eq!(reloaded.len(), 2);
    for (original, loaded) in dfas.iter().zip(&reloaded) {
        assert_eq!(loaded.tag(), original.tag());
        assert_eq!(loaded.alphabet(), original.alphabet());
        assert_eq!(loaded.initial_state(), original.initial_state());
        assert_eq!(loaded.final_states(), original.final_states());

        let mut expected = original.transitions().to_vec();
        expected.sort();
        let mut actual = loaded.transitions().to_vec();
        actual.sort();
        assert_eq!(actual, expected);
        assert_eq!(loaded.to_string(), original.to_string());
    }
}

#[test]
fn test_persisted_block_layout() {
    let text = dfa_for("a", "A").to_persisted();

    assert_eq!(text, "a\nA\n0\n0,'a',1\n1,'a',2\n2,'a',2\n1 ");
}

#[test]
fn test_persisted_without_final_states() {
    let dfas = parse_persisted("a\nNONE\n0\n0,'a',0\n\n\nb\nB\n0\n0,'b',1\n1,'b',1\n1\n").unwrap();

    assert_eq!(dfas.len(), 2);
    assert!(dfas[0].final_states().is_empty());
    assert_eq!(dfas[0].transitions().len(), 1);
    assert_eq!(dfas[1].final_states(), &BTreeSet::from([1]));
    assert!(dfas[1].accepts("bbb"));
}

#[test]
fn test_persisted_untagged_round_trip() {
    let untagged = dfa::build(&nfa::from_expression(&parse_regex("ab*").unwrap()), None);
    let dfas = vec![untagged, dfa_for("b", "B")];
    let text = to_persisted(&dfas);
    assert!(text.starts_with("ab\n\n0\n"));

    let reloaded = parse_persisted(&text).unwrap();

    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].tag(), None);
    assert_eq!(reloaded[0].final_states(), dfas[0].final_states());
    assert!(reloaded[0].accepts("abbb"));
    assert_eq!(reloaded[1].tag(), Some("B"));
    assert_eq!(to_persisted(&reloaded), text);
}

#[test]
fn test_persisted_rejects_unknown_symbol() {
    let error = parse_persisted("a\nA\n0\n0,'b',1\n1\n").unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedAutomaton");
}

#[test]
fn test_persisted_rejects_short_block() {
    let error = parse_persisted("a\nA\n").unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedAutomaton");
}
