//! Declarations and assignments

use crate::frontend::core::lexer::TokenKind;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::ParserState;
use smallvec::SmallVec;

/// Parse `int a, b, c [= expr];`
pub fn parse_declaration(state: &mut ParserState<'_>) -> Option<Declaration> {
    let start = state.bump().span; // consume 'int'

    let mut names = SmallVec::new();
    loop {
        let token = state.expect(TokenKind::Identifier)?;
        names.push(Ident::new(token.text, token.span));
        if !state.skip(TokenKind::Comma) {
            break;
        }
    }

    let init = if state.skip(TokenKind::Eq) {
        Some(state.parse_expr()?)
    } else {
        None
    };

    state.expect(TokenKind::Semicolon)?;

    Some(Declaration {
        names,
        init,
        span: start.to(state.prev_span()),
    })
}

/// Parse `x op expr;`
pub fn parse_assignment(state: &mut ParserState<'_>) -> Option<Assignment> {
    let token = state.expect(TokenKind::Identifier)?;
    let target = Ident::new(token.text, token.span);

    let op = match state.kind() {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        _ => {
            state.error_expected(&[
                TokenKind::Eq,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
            ]);
            return None;
        }
    };
    state.bump();

    let value = state.parse_expr()?;
    state.expect(TokenKind::Semicolon)?;

    Some(Assignment {
        span: target.span.to(state.prev_span()),
        target,
        op,
        value,
    })
}
