//! Utility macros for the lexer generator.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$tag` - The rule tag
/// * `$lexeme` - The matched text
/// * `$offset` - Character offset of the match in the input
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!("NUM".to_string(), "42".to_string(), 0);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($tag:expr, $lexeme:expr, $offset:expr) => {
        Token {
            tag: $tag,
            lexeme: $lexeme,
            offset: $offset,
        }
    };
}
