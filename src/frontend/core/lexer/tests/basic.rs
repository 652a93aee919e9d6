//! 基础测试

use super::kinds;
use crate::frontend::core::lexer::{tokenize, Lexer, TokenKind, TokenSource};
use crate::util::span::Position;

#[test]
fn test_empty_source() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_whitespace_only() {
    assert!(kinds(" \t\r\n\x0b\x0c ").is_empty());
}

#[test]
fn test_identifier_text() {
    let tokens = tokenize("counter x1 a_b");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "counter");
    assert_eq!(tokens[1].text, "x1");
    assert_eq!(tokens[2].text, "a_b");
}

#[test]
fn test_integer_literal() {
    let tokens = tokenize("12345 0");
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].text, "12345");
    assert_eq!(tokens[1].text, "0");
}

#[test]
fn test_digits_then_letters_split() {
    assert_eq!(kinds("12ab"), vec![TokenKind::IntLiteral, TokenKind::Identifier]);
}

#[test]
fn test_line_comment_skipped() {
    assert_eq!(
        kinds("x // the rest is ignored ; +\ny"),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("int x;\n  x = 1;");
    assert_eq!(tokens[0].span.start, Position::with_offset(1, 1, 0));
    assert_eq!(tokens[0].span.end, Position::with_offset(1, 4, 3));
    // second `x`
    assert_eq!(tokens[3].span.start, Position::with_offset(2, 3, 9));
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");
    assert_eq!(TokenSource::next_token(&mut lexer).kind, TokenKind::Identifier);
    for _ in 0..3 {
        assert_eq!(TokenSource::next_token(&mut lexer).kind, TokenKind::Eof);
    }

    let mut collected = tokenize("").into_iter();
    assert_eq!(collected.next_token().kind, TokenKind::Eof);
    assert_eq!(collected.next_token().kind, TokenKind::Eof);
}
