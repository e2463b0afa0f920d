//! Shift/reduce parser for infix regular expressions.
//!
//! Input units are shifted onto a stack of fragments one at a time and the
//! top of the stack is reduced eagerly:
//!
//! - `*` and `+` bind tightest and wrap the fragment beneath them at once
//! - `)` collapses everything back to its matching `(`
//! - whatever is left at the end of input is collapsed the same way
//!
//! Collapsing a region first concatenates adjacent fragments and then joins
//! the `|`-separated alternatives, so concatenation binds tighter than union.

use std::str::Chars;

use crate::{
    ast::expression::Expression,
    automaton::symbol::decode_escape,
    errors::errors::{Error, ErrorImpl},
};

#[derive(Debug, Clone)]
enum Fragment {
    Expr(Expression),
    Star,
    Plus,
    Open,
    Close,
    Bar,
}

/// Parses an infix pattern such as `(a|b)*'\n'` into an expression tree.
pub fn parse_regex(pattern: &str) -> Result<Expression, Error> {
    let mut stack: Vec<Fragment> = vec![];
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        let fragment = match c {
            '\'' => Fragment::Expr(Expression::Symbol(read_quoted(&mut chars, pattern)?)),
            '*' => Fragment::Star,
            '+' => Fragment::Plus,
            '(' => Fragment::Open,
            ')' => Fragment::Close,
            '|' => Fragment::Bar,
            c => Fragment::Expr(Expression::Symbol(c)),
        };

        stack.push(fragment);
        reduce(&mut stack, pattern)?;
    }

    if stack.is_empty() {
        return Err(Error::config(ErrorImpl::EmptyPattern));
    }

    fold_concat_union(stack, pattern)
}

/// Reads the body of a quoted literal; the opening quote is already consumed.
fn read_quoted(chars: &mut Chars, pattern: &str) -> Result<char, Error> {
    let unterminated = || {
        Error::config(ErrorImpl::UnterminatedQuote {
            pattern: pattern.to_string(),
        })
    };

    let symbol = match chars.next().ok_or_else(unterminated)? {
        '\\' => {
            let escape = chars.next().ok_or_else(unterminated)?;
            decode_escape(escape).ok_or_else(|| {
                Error::config(ErrorImpl::InvalidEscape {
                    escape,
                    pattern: pattern.to_string(),
                })
            })?
        }
        c => c,
    };

    match chars.next() {
        Some('\'') => Ok(symbol),
        _ => Err(unterminated()),
    }
}

fn reduce(stack: &mut Vec<Fragment>, pattern: &str) -> Result<(), Error> {
    match stack.last() {
        Some(Fragment::Star) | Some(Fragment::Plus) => {
            let is_star = matches!(stack.pop(), Some(Fragment::Star));

            let operand = match stack.pop() {
                Some(Fragment::Expr(expr)) => expr,
                _ => {
                    return Err(Error::config(ErrorImpl::DanglingOperator {
                        operator: if is_star { '*' } else { '+' },
                        pattern: pattern.to_string(),
                    }))
                }
            };

            let expr = if is_star {
                Expression::star(operand)
            } else {
                Expression::plus(operand)
            };
            stack.push(Fragment::Expr(expr));
        }
        Some(Fragment::Close) => {
            stack.pop();

            let open = stack
                .iter()
                .rposition(|fragment| matches!(fragment, Fragment::Open))
                .ok_or_else(|| {
                    Error::config(ErrorImpl::UnbalancedBrackets {
                        pattern: pattern.to_string(),
                    })
                })?;

            let region = stack.split_off(open + 1);
            stack.pop();

            if region.is_empty() {
                return Err(Error::config(ErrorImpl::EmptyGroup {
                    pattern: pattern.to_string(),
                }));
            }

            let expr = fold_concat_union(region, pattern)?;
            stack.push(Fragment::Expr(expr));
        }
        _ => {}
    }

    Ok(())
}

/// Collapses a bracket-free region into a single expression.
fn fold_concat_union(region: Vec<Fragment>, pattern: &str) -> Result<Expression, Error> {
    let mut alternatives: Vec<Vec<Expression>> = vec![vec![]];

    for fragment in region {
        match fragment {
            Fragment::Expr(expr) => {
                if let Some(current) = alternatives.last_mut() {
                    current.push(expr);
                }
            }
            Fragment::Bar => alternatives.push(vec![]),
            Fragment::Open | Fragment::Close => {
                return Err(Error::config(ErrorImpl::UnbalancedBrackets {
                    pattern: pattern.to_string(),
                }))
            }
            // Postfix operators are reduced on shift, so this is never reached
            // for a region built by `parse_regex`.
            Fragment::Star | Fragment::Plus => {
                return Err(Error::config(ErrorImpl::DanglingOperator {
                    operator: '*',
                    pattern: pattern.to_string(),
                }))
            }
        }
    }

    let dangling_bar = || {
        Error::config(ErrorImpl::DanglingOperator {
            operator: '|',
            pattern: pattern.to_string(),
        })
    };

    let concatenated = alternatives
        .into_iter()
        .map(|alternative| {
            alternative
                .into_iter()
                .rev()
                .reduce(|acc, expr| Expression::concat(expr, acc))
                .ok_or_else(dangling_bar)
        })
        .collect::<Result<Vec<_>, _>>()?;

    concatenated
        .into_iter()
        .rev()
        .reduce(|acc, expr| Expression::union(expr, acc))
        .ok_or_else(dangling_bar)
}
