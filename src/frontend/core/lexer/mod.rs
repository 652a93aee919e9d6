//! Lexer module
//!
//! Character-class scanner. The parser pulls tokens one at a time through
//! [`TokenSource`]; [`tokenize`] collects a whole stream up front.

pub mod state;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use tokenizer::Lexer;
pub use tokens::{Token, TokenKind};

use crate::util::span::Span;

/// Pull-based token stream
///
/// After end of input every call returns an `Eof` token.
pub trait TokenSource {
    /// Produce the next token
    fn next_token(&mut self) -> Token;
}

/// Pre-collected tokens, e.g. from [`tokenize`]
impl TokenSource for std::vec::IntoIter<Token> {
    fn next_token(&mut self) -> Token {
        self.next().unwrap_or_else(|| Token::eof(Span::dummy()))
    }
}

/// Tokenize source code
///
/// The result always ends with a single `Eof` token. Characters outside the
/// language become `Unknown` tokens; reporting them is the parser's job.
pub fn tokenize(source: &str) -> Vec<Token> {
    tracing::debug!("Lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        if !done {
            tracing::trace!("token {:?} '{}' at {}", token.kind, token.text, token.span.start);
        }
        tokens.push(token);
        if done {
            break;
        }
    }

    tracing::debug!("Lexing complete, {} tokens", tokens.len());
    tokens
}
