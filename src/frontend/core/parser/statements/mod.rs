//! Statement parsing modules

pub mod control_flow;
pub mod declarations;

use crate::frontend::core::lexer::TokenKind;
use crate::frontend::core::parser::ast::Stmt;
use crate::frontend::core::parser::ParserState;

/// Top-level statement dispatch
pub trait StatementParser {
    /// Parse one statement, recording an error and returning `None` on failure
    fn parse_statement(&mut self) -> Option<Stmt>;
}

impl StatementParser for ParserState<'_> {
    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.kind() {
            TokenKind::KwInt => declarations::parse_declaration(self).map(Stmt::Declaration),
            TokenKind::Identifier => declarations::parse_assignment(self).map(Stmt::Assignment),
            TokenKind::KwIf => control_flow::parse_conditional(self).map(Stmt::Conditional),
            TokenKind::KwLoopc => control_flow::parse_loop(self).map(Stmt::Loop),
            _ => {
                self.error_expected(&[
                    TokenKind::KwInt,
                    TokenKind::Identifier,
                    TokenKind::KwIf,
                    TokenKind::KwLoopc,
                ]);
                None
            }
        }
    }
}
