//! Control flow statement parsing
//! Handles `if/elif/else` and `loopc`

use crate::frontend::core::lexer::TokenKind;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::ParserState;

use super::declarations::parse_assignment;

/// Parse `: begin assignment* end`
pub fn parse_block(state: &mut ParserState<'_>) -> Option<Block> {
    let start = state.expect(TokenKind::Colon)?.span;
    state.expect(TokenKind::KwBegin)?;
    state.enter_block();

    let mut stmts = Vec::new();
    while !state.at(TokenKind::KwEnd) {
        if !state.at(TokenKind::Identifier) {
            state.error_expected(&[TokenKind::Identifier, TokenKind::KwEnd]);
            return None;
        }
        stmts.push(parse_assignment(state)?);
    }
    let end = state.bump().span; // consume 'end'
    state.leave_block();

    Some(Block {
        stmts,
        span: start.to(end),
    })
}

/// Parse a condition and its block, after the leading keyword
fn parse_cond_branch(state: &mut ParserState<'_>) -> Option<CondBranch> {
    let start = state.bump().span; // consume 'if' / 'elif'
    let condition = state.parse_logical_condition()?;
    let body = parse_block(state)?;
    Some(CondBranch {
        span: start.to(body.span),
        condition,
        body,
    })
}

/// Parse `if ... [elif ...]* [else ...]`
pub fn parse_conditional(state: &mut ParserState<'_>) -> Option<Conditional> {
    let then_branch = parse_cond_branch(state)?;

    let mut elif_branches = Vec::new();
    while state.at(TokenKind::KwElif) {
        elif_branches.push(parse_cond_branch(state)?);
    }

    let else_block = if state.skip(TokenKind::KwElse) {
        Some(parse_block(state)?)
    } else {
        None
    };

    Some(Conditional {
        span: then_branch.span.to(state.prev_span()),
        then_branch,
        elif_branches,
        else_block,
    })
}

/// Parse `loopc cond : begin ... end`
pub fn parse_loop(state: &mut ParserState<'_>) -> Option<Loop> {
    let start = state.bump().span; // consume 'loopc'
    let condition = state.parse_logical_condition()?;
    let body = parse_block(state)?;
    Some(Loop {
        span: start.to(body.span),
        condition,
        body,
    })
}
