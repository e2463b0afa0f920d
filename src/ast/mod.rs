//! Expression trees for token patterns.
//!
//! Patterns are represented as an owned tree of five node kinds (symbol,
//! star, plus, concatenation and union). Trees are produced either by the
//! infix parser in [`crate::parser`] or by the prefix-notation reader on
//! [`expression::Expression::from_prenex`].

pub mod expression;

#[cfg(test)]
mod tests;
