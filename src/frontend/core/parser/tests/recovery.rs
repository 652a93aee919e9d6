//! 错误报告与恢复测试

use crate::frontend::config::ErrorRecoveryStrategy;
use crate::frontend::core::lexer::{tokenize, TokenKind};
use crate::frontend::core::parser::{parse, parse_source, parse_with, ParseError};

fn errors(source: &str) -> Vec<ParseError> {
    parse_source(source).expect_err("source should not parse")
}

#[test]
fn test_missing_identifier_in_declaration() {
    let errs = errors("int ;");
    assert_eq!(errs.len(), 1);
    match &errs[0] {
        ParseError::ExpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, &[TokenKind::Identifier]);
            assert_eq!(*found, TokenKind::Semicolon);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(errs[0].to_string(), "Expected identifier, found ';'");
}

#[test]
fn test_unknown_token_reported_as_lexical() {
    let errs = errors("int x = 1;\nx = x ! 2;");
    assert!(matches!(&errs[0], ParseError::UnknownToken { text, .. } if text == "!"));
    assert_eq!(errs[0].span().start.line, 2);
    assert_eq!(errs[0].to_diagnostic().code, "E0001");
}

#[test]
fn test_integer_out_of_range() {
    let errs = errors("int x = 2147483648;");
    assert!(matches!(&errs[0], ParseError::IntegerOutOfRange { text, .. } if text == "2147483648"));
    assert_eq!(errs[0].to_diagnostic().code, "E0003");
}

#[test]
fn test_missing_semicolon_at_eof() {
    let errs = errors("int x = 1");
    assert!(matches!(
        &errs[0],
        ParseError::ExpectedToken { found: TokenKind::Eof, .. }
    ));
    assert_eq!(errs[0].to_string(), "Expected ';', found end of input");
}

#[test]
fn test_block_rejects_declarations() {
    let errs = errors("if 1 > 0 : begin int y; end");
    assert!(matches!(
        &errs[0],
        ParseError::ExpectedToken { found: TokenKind::KwInt, .. }
    ));
}

#[test]
fn test_panic_mode_reports_one_error_and_drains() {
    let mut tokens = tokenize("int ; x = ; y = 1 +;").into_iter();
    let errs = parse(&mut tokens).unwrap_err();
    assert_eq!(errs.len(), 1);
    // every token was consumed
    assert_eq!(tokens.len(), 0);
}

#[test]
fn test_skip_statement_collects_all_errors() {
    let mut tokens = tokenize("int ;\nint x = 1;\nx = ;\nx = 2;\ny 3;").into_iter();
    let errs = parse_with(&mut tokens, ErrorRecoveryStrategy::SkipStatement).unwrap_err();
    assert_eq!(errs.len(), 3);
    let lines: Vec<_> = errs.iter().map(|e| e.span().start.line).collect();
    assert_eq!(lines, [1, 3, 5]);
}

#[test]
fn test_skip_statement_without_errors_succeeds() {
    let mut tokens = tokenize("int x; x = 1;").into_iter();
    let program = parse_with(&mut tokens, ErrorRecoveryStrategy::SkipStatement).unwrap();
    assert_eq!(program.stmts.len(), 2);
}

#[test]
fn test_skip_statement_error_inside_block() {
    let mut tokens = tokenize("int x;\nif x > 1 : begin x = ; end\nx = 2;").into_iter();
    let errs = parse_with(&mut tokens, ErrorRecoveryStrategy::SkipStatement).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].span().start.line, 2);
    assert!(matches!(
        &errs[0],
        ParseError::ExpectedToken { found: TokenKind::Semicolon, .. }
    ));
}

#[test]
fn test_skip_statement_skips_trailing_branches() {
    let source = "int x;\n\
                  if x > : begin x = 1; end\n\
                  elif x < 0 : begin x = 2; end\n\
                  else : begin x = 3; end\n\
                  loopc x < 3 : begin x += ; end\n\
                  y 4;";
    let mut tokens = tokenize(source).into_iter();
    let errs = parse_with(&mut tokens, ErrorRecoveryStrategy::SkipStatement).unwrap_err();
    let lines: Vec<_> = errs.iter().map(|e| e.span().start.line).collect();
    assert_eq!(lines, [2, 5, 6]);
}
