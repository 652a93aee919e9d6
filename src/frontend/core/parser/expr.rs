//! Expression and condition parsing
//!
//! ```text
//! Expr      := Term (("+"|"-") Term)*
//! Term      := Power (("*"|"/"|"%") Power)*
//! Power     := Atom ("^" Power)?
//! Atom      := IntegerLiteral | Ident | "(" Expr ")"
//! LogicCond := RelCond (("and"|"or") RelCond)*
//! RelCond   := Expr RelOp Expr
//! ```

use crate::frontend::core::lexer::TokenKind;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::{ParseError, ParserState};

impl ParserState<'_> {
    /// Parse an additive expression
    pub fn parse_expr(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }
        Some(left)
    }

    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.bump();
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }
        Some(left)
    }

    /// `^` is right-associative
    fn parse_power(&mut self) -> Option<Expr> {
        let base = self.parse_atom()?;
        if self.skip(TokenKind::Caret) {
            let exponent = self.parse_power()?;
            Some(Expr::binary(BinOp::Pow, base, exponent))
        } else {
            Some(base)
        }
    }

    fn parse_atom(&mut self) -> Option<Expr> {
        match self.kind() {
            TokenKind::IntLiteral => {
                let token = self.bump();
                match token.text.parse::<i32>() {
                    Ok(value) => Some(Expr::Int(value, token.span)),
                    Err(_) => {
                        self.error(ParseError::IntegerOutOfRange {
                            text: token.text,
                            span: token.span,
                        });
                        None
                    }
                }
            }
            TokenKind::Identifier => {
                let token = self.bump();
                Some(Expr::Var(token.text, token.span))
            }
            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Some(expr)
            }
            _ => {
                self.error_expected(&[
                    TokenKind::IntLiteral,
                    TokenKind::Identifier,
                    TokenKind::LParen,
                ]);
                None
            }
        }
    }

    /// Parse `expr relop expr`
    pub fn parse_condition(&mut self) -> Option<Condition> {
        let left = self.parse_expr()?;
        let op = match self.kind() {
            TokenKind::EqEq => RelOp::Eq,
            TokenKind::Neq => RelOp::Ne,
            TokenKind::Gt => RelOp::Gt,
            TokenKind::Lt => RelOp::Lt,
            TokenKind::Ge => RelOp::Ge,
            TokenKind::Le => RelOp::Le,
            _ => {
                self.error_expected(&[
                    TokenKind::EqEq,
                    TokenKind::Neq,
                    TokenKind::Gt,
                    TokenKind::Lt,
                    TokenKind::Ge,
                    TokenKind::Le,
                ]);
                return None;
            }
        };
        self.bump();
        let right = self.parse_expr()?;
        let span = left.span().to(right.span());
        Some(Condition {
            op,
            left,
            right,
            span,
        })
    }

    /// `and` and `or` bind equally, left to right
    pub fn parse_logical_condition(&mut self) -> Option<LogicalCondition> {
        let mut left = LogicalCondition::Rel(self.parse_condition()?);
        loop {
            let op = match self.kind() {
                TokenKind::KwAnd => LogicalOp::And,
                TokenKind::KwOr => LogicalOp::Or,
                _ => break,
            };
            self.bump();
            let right = LogicalCondition::Rel(self.parse_condition()?);
            let span = left.span().to(right.span());
            left = LogicalCondition::Logical {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }
        Some(left)
    }
}
