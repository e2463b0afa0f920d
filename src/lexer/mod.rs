//! Lexical analysis with generated automata.
//!
//! This module contains the scanner that runs an ordered list of rule DFAs
//! over an input text. It handles:
//!
//! - Greedy longest-match tokenization
//! - Rule priority on equal-length matches
//! - Positioned errors for unknown characters and stuck states

pub mod lexer;
pub mod tokens;
