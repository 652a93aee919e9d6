//! Lexer tests module
//!
//! - basic: 标识符、整数、空白符、位置
//! - operators: 运算符与分隔符
//! - keywords: 关键字
//! - errors: 未知字符

mod basic;

use super::{tokenize, TokenKind};

/// Token kinds of `source`, without the trailing `Eof`
pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut kinds: Vec<_> = tokenize(source).into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds.pop(), Some(TokenKind::Eof));
    kinds
}
