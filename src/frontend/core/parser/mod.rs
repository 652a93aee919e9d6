//! Parser module
//!
//! Recursive descent with one token of lookahead. Tokens are pulled from a
//! [`TokenSource`] as needed; the result is an owning [`Program`] tree.

pub mod ast;
mod expr;
pub mod parser_state;
pub mod statements;
#[cfg(test)]
mod tests;

pub use ast::*;
pub use parser_state::{ParseError, ParserState};
pub use statements::StatementParser;

use crate::frontend::config::ErrorRecoveryStrategy;
use crate::frontend::core::lexer::{Lexer, TokenSource};
use crate::util::span::Span;

/// Parse a token stream into a program, stopping at the first error
pub fn parse<S: TokenSource>(source: &mut S) -> Result<Program, Vec<ParseError>> {
    parse_with(source, ErrorRecoveryStrategy::Panic)
}

/// Parse a token stream with the given recovery strategy
///
/// With `Panic` the remaining input is drained after the first error and
/// exactly one error is returned. With `SkipStatement` parsing resumes after
/// the next `;`, or after the enclosing block's `end`, and every error is
/// collected. Either way a unit
/// with errors yields no tree.
pub fn parse_with<S: TokenSource>(
    source: &mut S,
    strategy: ErrorRecoveryStrategy,
) -> Result<Program, Vec<ParseError>> {
    tracing::debug!("Parsing (recovery: {})", strategy);

    let mut state = ParserState::new(source);
    let mut stmts = Vec::new();

    while !state.at_end() {
        match state.parse_statement() {
            Some(stmt) => stmts.push(stmt),
            None => match strategy {
                ErrorRecoveryStrategy::Panic => {
                    state.drain();
                    break;
                }
                ErrorRecoveryStrategy::SkipStatement => state.synchronize(),
            },
        }
    }

    if state.has_errors() {
        let errors = state.into_errors();
        tracing::debug!("Parsing failed with {} error(s)", errors.len());
        return Err(errors);
    }

    let span = match (stmts.first(), stmts.last()) {
        (Some(first), Some(last)) => first.span().to(last.span()),
        _ => Span::dummy(),
    };
    tracing::debug!("Parsed {} statement(s)", stmts.len());

    Ok(Program { stmts, span })
}

/// Scan and parse source text
pub fn parse_source(source: &str) -> Result<Program, Vec<ParseError>> {
    let mut lexer = Lexer::new(source);
    parse(&mut lexer)
}
