//! Error types and error handling for the lexer generator.
//!
//! This module defines the errors produced across the pipeline:
//!
//! - Construction-time failures for malformed patterns, rule files and
//!   persisted automata
//! - Lexical failures raised while scanning, positioned in the input

pub mod errors;
