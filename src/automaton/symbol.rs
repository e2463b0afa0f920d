//! Symbol units, transition labels and escape handling.

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

lazy_static! {
    /// Two-character escapes accepted inside quoted literals, keyed by the
    /// character following the backslash.
    pub static ref ESCAPE_LOOKUP: HashMap<char, char> = {
        let mut map = HashMap::new();
        map.insert('n', '\n');
        map.insert('t', '\t');
        map.insert('r', '\r');
        map.insert('0', '\0');
        map.insert('\\', '\\');
        map.insert('\'', '\'');
        map
    };
}

/// Identifier of an automaton state.
pub type StateId = usize;

/// Label of an automaton edge. Only NFAs carry `Epsilon` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

impl Label {
    pub fn symbol(&self) -> Option<char> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(c) => Some(*c),
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Epsilon => write!(f, "epsilon"),
            Label::Symbol(c) => write!(f, "{}", render_symbol(*c)),
        }
    }
}

/// Decodes the character following a backslash.
pub fn decode_escape(escape: char) -> Option<char> {
    ESCAPE_LOOKUP.get(&escape).copied()
}

/// Renders a symbol unit the way it is written in rule files and dumps:
/// control characters and the backslash come out in escaped form.
pub fn render_symbol(symbol: char) -> String {
    match symbol {
        '\n' => String::from("\\n"),
        '\t' => String::from("\\t"),
        '\r' => String::from("\\r"),
        '\0' => String::from("\\0"),
        '\\' => String::from("\\\\"),
        c => c.to_string(),
    }
}

/// Splits rendered text back into symbol units. Returns `None` on a dangling
/// or unknown escape.
pub fn parse_symbols(text: &str) -> Option<Vec<char>> {
    let mut symbols = vec![];
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            symbols.push(decode_escape(chars.next()?)?);
        } else {
            symbols.push(c);
        }
    }

    Some(symbols)
}

/// Parses exactly one rendered symbol unit.
pub fn parse_symbol(text: &str) -> Option<char> {
    match parse_symbols(text)?.as_slice() {
        [c] => Some(*c),
        _ => None,
    }
}
