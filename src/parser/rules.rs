//! Reader for rule files: one `<TAG> <pattern>;` declaration per line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::expression::Expression,
    errors::errors::{Error, ErrorImpl},
};

use super::parser::parse_regex;

lazy_static! {
    // The pattern runs up to the last `;` on the line.
    static ref RULE_LINE: Regex = Regex::new(r"^([^ ]+) (.*);").unwrap();
}

/// A named token rule. Rules keep their declaration order, which is also
/// their priority when two rules match the same longest prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub tag: String,
    pub pattern: Expression,
}

impl Rule {
    pub fn new(tag: &str, pattern: Expression) -> Self {
        Rule {
            tag: tag.to_string(),
            pattern,
        }
    }
}

/// Splits a single rule line into its tag and raw pattern text.
pub fn split_rule_line(line: &str) -> Option<(&str, &str)> {
    let captures = RULE_LINE.captures(line)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Parses every non-blank line of a rule file, in declaration order.
pub fn parse_rules(source: &str) -> Result<Vec<Rule>, Error> {
    let mut rules = vec![];

    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (tag, pattern) = split_rule_line(line).ok_or_else(|| {
            Error::config(ErrorImpl::MalformedRule {
                line: index + 1,
                text: line.to_string(),
            })
        })?;

        rules.push(Rule::new(tag, parse_regex(pattern)?));
    }

    Ok(rules)
}
