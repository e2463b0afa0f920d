//! Parsers turning rule text into expression trees.
//!
//! - `parser` handles the infix pattern syntax: literal symbols, implicit
//!   concatenation, `|`, `*`, `+`, parentheses and quoted literals such as
//!   `' '`, `'*'` or `'\n'`
//! - `rules` reads whole rule files, one `<TAG> <pattern>;` line per token

pub mod parser;
pub mod rules;
