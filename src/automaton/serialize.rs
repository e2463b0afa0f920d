//! Text formats for DFAs.
//!
//! `Display` writes the human-readable dump:
//!
//! ```text
//! <tag>
//! <sorted alphabet>
//! <state count>
//! <initial state>
//! <final states>
//! <curr>,'<symbol>',<next>    (one per transition, sorted)
//! ```
//!
//! The persisted format, read back by [`parse_persisted`], holds one block
//! per DFA separated by blank lines. The tag and final-state lines may be
//! empty:
//!
//! ```text
//! <sorted alphabet>
//! <tag>
//! <initial state>
//! <curr>,'<symbol>',<next>    (one per transition, sorted)
//! <final states>
//! ```

use std::{collections::BTreeSet, fmt::Display};

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    automaton::{Automaton, Dfa, Transition},
    symbol::{parse_symbol, parse_symbols, render_symbol, Label, StateId},
};

lazy_static! {
    static ref TRANSITION_LINE: Regex = Regex::new(r"^(\d+),'(.+)',(\d+)$").unwrap();
}

fn malformed(message: String) -> Error {
    Error::config(ErrorImpl::MalformedAutomaton { message })
}

fn alphabet_line(dfa: &Dfa) -> String {
    let mut symbols: Vec<String> = dfa.alphabet().iter().map(|c| render_symbol(*c)).collect();
    symbols.sort();
    symbols.concat()
}

/// Every final state id followed by a space, `"1 3 "`.
fn final_states_line(dfa: &Dfa) -> String {
    dfa.final_states()
        .iter()
        .map(|state| format!("{} ", state))
        .collect()
}

fn transition_lines(dfa: &Dfa) -> Vec<String> {
    let mut rendered: Vec<(StateId, String, StateId)> = dfa
        .transitions()
        .iter()
        .map(|transition| (transition.from, transition.label.to_string(), transition.to))
        .collect();
    rendered.sort();

    rendered
        .into_iter()
        .map(|(from, symbol, to)| format!("{},'{}',{}", from, symbol, to))
        .collect()
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.tag().unwrap_or_default())?;
        writeln!(f, "{}", alphabet_line(self))?;
        writeln!(f, "{}", self.state_count())?;
        writeln!(f, "{}", self.initial_state())?;
        write!(f, "{}", final_states_line(self))?;

        for line in transition_lines(self) {
            write!(f, "\n{}", line)?;
        }

        Ok(())
    }
}

impl Dfa {
    /// Serializes this DFA as one block of the persisted format.
    pub fn to_persisted(&self) -> String {
        let mut lines = vec![
            alphabet_line(self),
            self.tag().unwrap_or_default().to_string(),
            self.initial_state().to_string(),
        ];
        lines.extend(transition_lines(self));
        lines.push(final_states_line(self));
        lines.join("\n")
    }
}

/// Serializes a list of DFAs as blank-line separated persisted blocks.
pub fn to_persisted(dfas: &[Dfa]) -> String {
    dfas.iter()
        .map(Dfa::to_persisted)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Reads every DFA block from persisted text, in order.
///
/// Blocks are read by position rather than split on blank lines: an untagged
/// DFA has an empty tag line and a DFA without final states has an empty
/// final-state line, and both would otherwise look like separators.
pub fn parse_persisted(source: &str) -> Result<Vec<Dfa>, Error> {
    let mut lines = source.lines().peekable();
    let mut dfas = vec![];

    loop {
        while lines.next_if(|line| line.is_empty()).is_some() {}
        let Some(alphabet_text) = lines.next() else {
            break;
        };

        let (Some(tag), Some(initial_text)) = (lines.next(), lines.next()) else {
            return Err(malformed(format!(
                "block starting with alphabet {:?} ends before its initial state",
                alphabet_text
            )));
        };

        let mut transition_texts = vec![];
        while let Some(line) = lines.next_if(|line| TRANSITION_LINE.is_match(line)) {
            transition_texts.push(line);
        }

        // A missing final-state line at the end of input means no finals.
        let finals_text = lines.next().unwrap_or_default();

        dfas.push(parse_block(
            alphabet_text,
            tag,
            initial_text,
            &transition_texts,
            finals_text,
        )?);
    }

    Ok(dfas)
}

fn parse_block(
    alphabet_text: &str,
    tag: &str,
    initial_text: &str,
    transition_texts: &[&str],
    finals_text: &str,
) -> Result<Dfa, Error> {
    let alphabet: BTreeSet<char> = parse_symbols(alphabet_text)
        .ok_or_else(|| malformed(format!("invalid alphabet {:?}", alphabet_text)))?
        .into_iter()
        .collect();

    let initial = parse_state(initial_text)?;

    let transitions = transition_texts
        .iter()
        .map(|line| parse_transition(line, &alphabet))
        .collect::<Result<Vec<_>, _>>()?;

    let finals = finals_text
        .split_whitespace()
        .map(parse_state)
        .collect::<Result<BTreeSet<_>, _>>()?;

    let tag = if tag.is_empty() { None } else { Some(tag.to_string()) };

    Ok(Dfa::new(alphabet, transitions, initial, finals, tag))
}

fn parse_state(text: &str) -> Result<StateId, Error> {
    text.trim()
        .parse()
        .map_err(|_| malformed(format!("invalid state id {:?}", text)))
}

fn parse_transition(line: &str, alphabet: &BTreeSet<char>) -> Result<Transition, Error> {
    let captures = TRANSITION_LINE
        .captures(line)
        .ok_or_else(|| malformed(format!("invalid transition {:?}", line)))?;

    let symbol = parse_symbol(&captures[2])
        .ok_or_else(|| malformed(format!("invalid symbol in transition {:?}", line)))?;
    if !alphabet.contains(&symbol) {
        return Err(malformed(format!(
            "symbol {:?} in transition {:?} is not in the alphabet",
            render_symbol(symbol),
            line
        )));
    }

    Ok(Transition::new(
        parse_state(&captures[1])?,
        Label::Symbol(symbol),
        parse_state(&captures[3])?,
    ))
}
