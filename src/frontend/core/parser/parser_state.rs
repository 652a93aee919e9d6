//! Parser state and error handling

use crate::frontend::core::lexer::{Token, TokenKind, TokenSource};
use crate::util::diagnostic::{Diagnostic, ErrorCodeDefinition};
use crate::util::span::Span;

/// Parse error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Expected one of `expected`, found something else
    #[error("Expected {}, found {}", one_of(.expected), describe(.found, .text))]
    ExpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        text: String,
        span: Span,
    },
    /// A character sequence outside the language
    #[error("Unknown token '{text}'")]
    UnknownToken { text: String, span: Span },
    /// Integer literal that does not fit in `i32`
    #[error("Integer literal '{text}' is out of range")]
    IntegerOutOfRange { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedToken { span, .. }
            | ParseError::UnknownToken { span, .. }
            | ParseError::IntegerOutOfRange { span, .. } => *span,
        }
    }

    /// Convert to a coded diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let builder = match self {
            ParseError::ExpectedToken {
                expected,
                found,
                text,
                ..
            } => ErrorCodeDefinition::expected_token(&one_of(expected), &describe(found, text)),
            ParseError::UnknownToken { text, .. } => ErrorCodeDefinition::unknown_token(text),
            ParseError::IntegerOutOfRange { text, .. } => {
                ErrorCodeDefinition::integer_out_of_range(text)
            }
        };
        builder.at(self.span()).build()
    }
}

/// "identifier", "identifier or '('", "one of '=', '+='"
fn one_of(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "a token".to_string(),
        [only] => only.to_string(),
        [a, b] => format!("{} or {}", a, b),
        many => {
            let list: Vec<String> = many.iter().map(|k| k.to_string()).collect();
            format!("one of {}", list.join(", "))
        }
    }
}

fn describe(
    kind: &TokenKind,
    text: &str,
) -> String {
    match kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Identifier => format!("identifier '{}'", text),
        TokenKind::IntLiteral => format!("integer literal '{}'", text),
        _ => format!("'{}'", text),
    }
}

/// Parser state: one token of lookahead over a pull-based source
pub struct ParserState<'a> {
    source: &'a mut dyn TokenSource,
    current: Token,
    prev_span: Span,
    errors: Vec<ParseError>,
    /// `begin` blocks entered but not yet closed
    block_depth: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a mut dyn TokenSource) -> Self {
        let current = source.next_token();
        Self {
            source,
            current,
            prev_span: Span::dummy(),
            errors: Vec::new(),
            block_depth: 0,
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub fn span(&self) -> Span {
        self.current.span
    }

    /// Span of the most recently consumed token
    pub fn prev_span(&self) -> Span {
        self.prev_span
    }

    pub fn bump(&mut self) -> Token {
        let next = self.source.next_token();
        let token = std::mem::replace(&mut self.current, next);
        self.prev_span = token.span;
        token
    }

    pub fn at(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current.kind == kind
    }

    pub fn skip(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn expect(
        &mut self,
        kind: TokenKind,
    ) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            self.error_expected(&[kind]);
            None
        }
    }

    /// Record that the current token is not one of `expected`
    ///
    /// An `Unknown` token is reported as a lexical error instead.
    pub fn error_expected(
        &mut self,
        expected: &[TokenKind],
    ) {
        let token = &self.current;
        let error = if token.kind == TokenKind::Unknown {
            ParseError::UnknownToken {
                text: token.text.clone(),
                span: token.span,
            }
        } else {
            ParseError::ExpectedToken {
                expected: expected.to_vec(),
                found: token.kind,
                text: token.text.clone(),
                span: token.span,
            }
        };
        self.error(error);
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        tracing::debug!("parse error: {}", error);
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Discard every remaining token
    pub fn drain(&mut self) {
        while !self.at_end() {
            self.bump();
        }
    }

    pub fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub fn leave_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    /// Skip to just past the next `;` or `end`
    ///
    /// Inside a block, or when a block opens before the next `;`, skip to the
    /// matching `end` and past any `elif`/`else` branches after it.
    pub fn synchronize(&mut self) {
        let mut depth = std::mem::take(&mut self.block_depth);
        loop {
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => {
                    self.bump();
                    break;
                }
                TokenKind::KwBegin => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::KwEnd => {
                    self.bump();
                    depth = depth.saturating_sub(1);
                    if depth == 0 && !matches!(self.kind(), TokenKind::KwElif | TokenKind::KwElse)
                    {
                        break;
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}
