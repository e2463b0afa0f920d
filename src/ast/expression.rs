use std::fmt::Display;

use crate::{
    automaton::symbol::{parse_symbol, render_symbol},
    errors::errors::{Error, ErrorImpl},
};

/// A regular expression tree. Built bottom-up by the parsers and consumed
/// once by the NFA builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Symbol(char),
    Star(Box<Expression>),
    Plus(Box<Expression>),
    Concat(Box<Expression>, Box<Expression>),
    Union(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn star(expr: Expression) -> Self {
        Expression::Star(Box::new(expr))
    }

    pub fn plus(expr: Expression) -> Self {
        Expression::Plus(Box::new(expr))
    }

    pub fn concat(left: Expression, right: Expression) -> Self {
        Expression::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Expression, right: Expression) -> Self {
        Expression::Union(Box::new(left), Box::new(right))
    }

    /// Right-nested union of every symbol in `symbols`, e.g. `0|1|...|9`.
    /// Returns `None` for an empty input.
    pub fn any_of(symbols: &str) -> Option<Self> {
        symbols
            .chars()
            .rev()
            .map(Expression::Symbol)
            .reduce(|acc, symbol| Expression::union(symbol, acc))
    }

    /// Reads an expression written in prefix notation, e.g.
    /// `UNION CONCAT a b STAR c`. Operands are whitespace separated; any word
    /// that is not an operator is a single symbol unit (escapes allowed).
    pub fn from_prenex(source: &str) -> Result<Self, Error> {
        let mut stack: Vec<Expression> = vec![];

        for word in source.split_whitespace().rev() {
            let expr = match word {
                "STAR" => Expression::star(pop_operand(&mut stack, word)?),
                "PLUS" => Expression::plus(pop_operand(&mut stack, word)?),
                "CONCAT" => {
                    let left = pop_operand(&mut stack, word)?;
                    let right = pop_operand(&mut stack, word)?;
                    Expression::concat(left, right)
                }
                "UNION" => {
                    let left = pop_operand(&mut stack, word)?;
                    let right = pop_operand(&mut stack, word)?;
                    Expression::union(left, right)
                }
                symbol => Expression::Symbol(parse_symbol(symbol).ok_or_else(|| {
                    Error::config(ErrorImpl::MalformedPrenex {
                        message: format!("invalid symbol {:?}", symbol),
                    })
                })?),
            };

            stack.push(expr);
        }

        match stack.len() {
            1 => Ok(stack.remove(0)),
            0 => Err(Error::config(ErrorImpl::EmptyPattern)),
            n => Err(Error::config(ErrorImpl::MalformedPrenex {
                message: format!("{} operands left without an operator", n),
            })),
        }
    }
}

fn pop_operand(stack: &mut Vec<Expression>, operator: &str) -> Result<Expression, Error> {
    stack.pop().ok_or_else(|| {
        Error::config(ErrorImpl::MalformedPrenex {
            message: format!("{} is missing an operand", operator),
        })
    })
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Symbol(c) => write!(f, "Symbol({})", render_symbol(*c)),
            Expression::Star(expr) => write!(f, "Star({})", expr),
            Expression::Plus(expr) => write!(f, "Plus({})", expr),
            Expression::Concat(left, right) => write!(f, "Concat({}, {})", left, right),
            Expression::Union(left, right) => write!(f, "Union({}, {})", left, right),
        }
    }
}
