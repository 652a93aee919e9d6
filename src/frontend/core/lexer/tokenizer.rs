//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::state::LexerState;
use super::TokenSource;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            state: LexerState::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek at character after next
    fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Consume the next character if it equals `expected`
    fn eat(
        &mut self,
        expected: char,
    ) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `//` line comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Generate next token
    ///
    /// Returns `Eof` at end of input, and keeps returning it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        let kind = match c {
            c if c.is_ascii_alphabetic() => return self.scan_identifier(),
            c if c.is_ascii_digit() => {
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
                TokenKind::IntLiteral
            }
            '+' => self.with_eq(TokenKind::Plus, TokenKind::PlusEq),
            '-' => self.with_eq(TokenKind::Minus, TokenKind::MinusEq),
            '*' => self.with_eq(TokenKind::Star, TokenKind::StarEq),
            '/' => self.with_eq(TokenKind::Slash, TokenKind::SlashEq),
            '%' => self.with_eq(TokenKind::Percent, TokenKind::PercentEq),
            '=' => self.with_eq(TokenKind::Eq, TokenKind::EqEq),
            '<' => self.with_eq(TokenKind::Lt, TokenKind::Le),
            '>' => self.with_eq(TokenKind::Gt, TokenKind::Ge),
            '!' => self.with_eq(TokenKind::Unknown, TokenKind::Neq),
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            _ => TokenKind::Unknown,
        };

        self.make_token(kind)
    }

    /// `single`, or `with_eq` when the next character is `=`
    fn with_eq(
        &mut self,
        single: TokenKind,
        with_eq: TokenKind,
    ) -> TokenKind {
        if self.eat('=') {
            with_eq
        } else {
            single
        }
    }

    /// Scan identifier or keyword
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.source[self.start_offset..self.offset];
        let kind = self
            .state
            .keyword_from_str(text)
            .unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Create token with current span and lexeme
    fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        let text = &self.source[self.start_offset..self.offset];
        Token::new(kind, text, self.span())
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}
