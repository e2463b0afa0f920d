use std::fmt::Display;

use crate::automaton::symbol::render_symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: String,
    pub lexeme: String,
    /// Character offset of the lexeme in the scanned input.
    pub offset: usize,
}

impl Token {
    /// Lexeme as printed in scanner output: a lone newline is shown in its
    /// escaped form.
    pub fn display_lexeme(&self) -> String {
        if self.lexeme == "\n" {
            render_symbol('\n')
        } else {
            self.lexeme.clone()
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag, self.display_lexeme())
    }
}

/// Renders a token stream one `<tag> <lexeme>` per line, without a trailing
/// newline.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
