use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Shorthand for construction-time failures, which carry no input position.
    pub fn config(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl, Position::None)
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedCharacter { .. } | ErrorImpl::NoViableAlternative
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnbalancedBrackets { .. } => "UnbalancedBrackets",
            ErrorImpl::DanglingOperator { .. } => "DanglingOperator",
            ErrorImpl::EmptyGroup { .. } => "EmptyGroup",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedQuote { .. } => "UnterminatedQuote",
            ErrorImpl::EmptyPattern => "EmptyPattern",
            ErrorImpl::MalformedRule { .. } => "MalformedRule",
            ErrorImpl::MalformedPrenex { .. } => "MalformedPrenex",
            ErrorImpl::MalformedAutomaton { .. } => "MalformedAutomaton",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::NoViableAlternative => "NoViableAlternative",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_lexical() {
            // Both lexical failures share the one user-visible message.
            return write!(f, "No viable alternative at character {}, line 0", self.position);
        }

        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unbalanced brackets in pattern {pattern:?}")]
    UnbalancedBrackets { pattern: String },
    #[error("operator {operator:?} has no operand in pattern {pattern:?}")]
    DanglingOperator { operator: char, pattern: String },
    #[error("empty group in pattern {pattern:?}")]
    EmptyGroup { pattern: String },
    #[error("invalid escape sequence \\{escape} in pattern {pattern:?}")]
    InvalidEscape { escape: char, pattern: String },
    #[error("unterminated quoted literal in pattern {pattern:?}")]
    UnterminatedQuote { pattern: String },
    #[error("empty pattern")]
    EmptyPattern,
    #[error("malformed rule on line {line}: {text:?}")]
    MalformedRule { line: usize, text: String },
    #[error("malformed prenex expression: {message}")]
    MalformedPrenex { message: String },
    #[error("malformed automaton: {message}")]
    MalformedAutomaton { message: String },
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("no viable alternative")]
    NoViableAlternative,
}
