//! Token types

use crate::util::span::Span;
use std::fmt;

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwAnd,
    KwOr,
    KwBegin,
    KwEnd,
    KwIf,
    KwElif,
    KwElse,
    KwLoopc,

    // Identifiers and literals
    Identifier,
    IntLiteral,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,

    // Relational
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,

    // Delimiters
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,

    // Special
    Unknown,
    Eof,
}

impl TokenKind {
    /// Is this one of the assignment operators
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
        )
    }

    /// Is this one of the relational operators
    pub fn is_rel_op(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::Neq
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            TokenKind::KwInt => "'int'",
            TokenKind::KwAnd => "'and'",
            TokenKind::KwOr => "'or'",
            TokenKind::KwBegin => "'begin'",
            TokenKind::KwEnd => "'end'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwElif => "'elif'",
            TokenKind::KwElse => "'else'",
            TokenKind::KwLoopc => "'loopc'",
            TokenKind::Identifier => "identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Caret => "'^'",
            TokenKind::Eq => "'='",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::EqEq => "'=='",
            TokenKind::Neq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Unknown => "unknown token",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme as it appears in the source
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// End-of-input token at `span`
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::IntLiteral => format!("integer literal '{}'", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token::new(kind, "", Span::dummy())
    }
}
