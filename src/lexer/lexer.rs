use std::fmt::Display;

use tracing::debug;

use crate::{
    automaton::{
        automaton::{Automaton, Dfa},
        dfa, nfa,
    },
    errors::errors::{Error, ErrorImpl},
    parser::rules::Rule,
    Position, MK_TOKEN,
};

use super::tokens::{render_tokens, Token};

/// Compiles one rule down to its tagged DFA.
pub fn compile_rule(rule: &Rule) -> Dfa {
    let nfa = nfa::from_expression(&rule.pattern);
    dfa::build(&nfa, Some(&rule.tag))
}

/// Longest-match scanner over an ordered list of DFAs. Earlier DFAs win ties.
#[derive(Debug, Clone)]
pub struct Lexer {
    dfas: Vec<Dfa>,
}

impl Lexer {
    pub fn new(dfas: Vec<Dfa>) -> Lexer {
        Lexer { dfas }
    }

    pub fn from_rules(rules: &[Rule]) -> Lexer {
        Lexer::new(rules.iter().map(compile_rule).collect())
    }

    pub fn dfas(&self) -> &[Dfa] {
        &self.dfas
    }

    /// Index of the DFA accepting the longest non-empty prefix of `input` and
    /// that prefix's length. The length is 0 when no DFA accepts anything;
    /// on equal lengths the lowest index wins.
    pub fn longest_prefix(&self, input: &[char]) -> (usize, usize) {
        let mut best = (0, 0);

        for (index, dfa) in self.dfas.iter().enumerate() {
            let length = dfa.longest_match(input);
            if length > best.1 {
                best = (index, length);
            }
        }

        best
    }

    /// Whether any rule's alphabet contains `c`.
    fn knows(&self, c: char) -> bool {
        self.dfas.iter().any(|dfa| dfa.alphabet().contains(&c))
    }

    /// Splits `source` into tokens by repeatedly taking the longest match.
    ///
    /// Scanning stops at the first lexical error, which is then the only
    /// result. Error offsets are found by searching for the first occurrence
    /// of the unmatched remainder in `source`, so they point too early when
    /// that remainder also occurs before the failure point.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, Error> {
        let chars: Vec<char> = source.chars().collect();
        let mut tokens = vec![];
        let mut pos = 0;

        while pos < chars.len() {
            let remaining = &chars[pos..];
            let (index, length) = self.longest_prefix(remaining);
            let next = pos + length;

            if let Some(&c) = chars.get(next) {
                if c != '\n' && !self.knows(c) {
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedCharacter { character: c },
                        Position::Offset(first_occurrence(&chars, &chars[next..])),
                    ));
                }
            }

            if length == 0 {
                let position = if remaining.len() == 1 {
                    Position::Eof
                } else {
                    Position::Offset(first_occurrence(&chars, remaining) + 1)
                };
                return Err(Error::new(ErrorImpl::NoViableAlternative, position));
            }

            let tag = self.dfas[index].tag().unwrap_or_default().to_string();
            tokens.push(MK_TOKEN!(tag, remaining[..length].iter().collect(), pos));
            pos = next;
        }

        debug!(tokens = tokens.len(), characters = chars.len(), "scanned input");
        Ok(tokens)
    }

    /// Scans `source` and renders the outcome the way it is written to the
    /// output: one token per line, or the single lexical error line.
    pub fn scan(&self, source: &str) -> Result<String, Error> {
        match self.tokenize(source) {
            Ok(tokens) => Ok(render_tokens(&tokens)),
            Err(error) if error.is_lexical() => Ok(error.to_string()),
            Err(error) => Err(error),
        }
    }
}

impl Display for Lexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for dfa in &self.dfas {
            writeln!(f, "{}", dfa)?;
        }
        Ok(())
    }
}

/// Offset of the first occurrence of `needle` in `haystack`.
fn first_occurrence(haystack: &[char], needle: &[char]) -> usize {
    if needle.is_empty() {
        return 0;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle)
        .unwrap_or(haystack.len() - needle.len().min(haystack.len()))
}
