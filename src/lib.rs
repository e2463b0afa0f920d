#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::expression::Expression,
    automaton::{automaton::Dfa, dfa, nfa, serialize::parse_persisted},
    errors::errors::Error,
    lexer::lexer::Lexer,
    parser::rules::parse_rules,
};

pub mod ast;
pub mod automaton;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Where an error happened in the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Character offset into the input.
    Offset(usize),
    /// The trailing character of the input.
    Eof,
    /// Construction-time errors have no input position.
    None,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Offset(offset) => write!(f, "{}", offset),
            Position::Eof => write!(f, "EOF"),
            Position::None => write!(f, "<none>"),
        }
    }
}

/// Compiles a rule file (`<TAG> <pattern>;` per line) into a scanner.
pub fn compile_rules(source: &str) -> Result<Lexer, Error> {
    Ok(Lexer::from_rules(&parse_rules(source)?))
}

/// Rebuilds a scanner from DFAs in the persisted format.
pub fn load_lexer(persisted: &str) -> Result<Lexer, Error> {
    Ok(Lexer::new(parse_persisted(persisted)?))
}

/// Builds the untagged DFA for an expression written in prefix notation.
pub fn prenex_to_dfa(source: &str) -> Result<Dfa, Error> {
    let expr = Expression::from_prenex(source)?;
    Ok(dfa::build(&nfa::from_expression(&expr), None))
}
