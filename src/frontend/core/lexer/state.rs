//! Keyword recognition

use crate::frontend::core::lexer::tokens::TokenKind;

/// Lexer state
///
/// Holds the keyword table of the language.
#[derive(Debug, Default)]
pub struct LexerState;

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self
    }

    /// Convert string to keyword token
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        match s {
            // Declarations
            "int" => Some(TokenKind::KwInt),

            // Logical connectives
            "and" => Some(TokenKind::KwAnd),
            "or" => Some(TokenKind::KwOr),

            // Blocks
            "begin" => Some(TokenKind::KwBegin),
            "end" => Some(TokenKind::KwEnd),

            // Control flow
            "if" => Some(TokenKind::KwIf),
            "elif" => Some(TokenKind::KwElif),
            "else" => Some(TokenKind::KwElse),
            "loopc" => Some(TokenKind::KwLoopc),

            _ => None,
        }
    }
}
