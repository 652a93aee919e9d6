//! Abstract Syntax Tree types
//!
//! Every node owns its children and carries its source span. Nodes are never
//! mutated after the parser builds them.

use crate::util::span::Span;
use smallvec::SmallVec;
use std::fmt;

/// Identifier with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(
        name: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
        };
        f.write_str(s)
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Int(i32, Span),
    Var(String, Span),
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Binary node spanning both operands
    pub fn binary(
        op: BinOp,
        left: Expr,
        right: Expr,
    ) -> Self {
        let span = left.span().to(right.span());
        Expr::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Int(_, span) | Expr::Var(_, span) => *span,
            Expr::BinOp { span, .. } => *span,
        }
    }
}

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl fmt::Display for RelOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Gt => ">",
            RelOp::Lt => "<",
            RelOp::Ge => ">=",
            RelOp::Le => "<=",
        };
        f.write_str(s)
    }
}

/// Relational comparison, the leaf of a logical condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub op: RelOp,
    pub left: Expr,
    pub right: Expr,
    pub span: Span,
}

/// `and` / `or`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

/// Left-associative tree of conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalCondition {
    Rel(Condition),
    Logical {
        op: LogicalOp,
        left: Box<LogicalCondition>,
        right: Box<LogicalCondition>,
        span: Span,
    },
}

impl LogicalCondition {
    pub fn span(&self) -> Span {
        match self {
            LogicalCondition::Rel(cond) => cond.span,
            LogicalCondition::Logical { span, .. } => *span,
        }
    }

    /// Number of relational leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            LogicalCondition::Rel(_) => 1,
            LogicalCondition::Logical { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Assignment operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    /// Arithmetic applied to the old value, `None` for plain `=`
    pub fn binop(self) -> Option<BinOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::AddAssign => Some(BinOp::Add),
            AssignOp::SubAssign => Some(BinOp::Sub),
            AssignOp::MulAssign => Some(BinOp::Mul),
            AssignOp::DivAssign => Some(BinOp::Div),
            AssignOp::ModAssign => Some(BinOp::Mod),
        }
    }
}

/// `int a, b = expr;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared names in source order, never empty
    pub names: SmallVec<[Ident; 4]>,
    /// Shared initializer, evaluated once
    pub init: Option<Expr>,
    pub span: Span,
}

/// `x op= expr;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: Ident,
    pub op: AssignOp,
    pub value: Expr,
    pub span: Span,
}

/// `: begin ... end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Assignment>,
    pub span: Span,
}

/// Condition with its guarded block (`if` and each `elif`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondBranch {
    pub condition: LogicalCondition,
    pub body: Block,
    pub span: Span,
}

/// `if ... elif ... else ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub then_branch: CondBranch,
    pub elif_branches: Vec<CondBranch>,
    pub else_block: Option<Block>,
    pub span: Span,
}

/// `loopc cond : begin ... end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub condition: LogicalCondition,
    pub body: Block,
    pub span: Span,
}

/// Top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Declaration(Declaration),
    Assignment(Assignment),
    Conditional(Conditional),
    Loop(Loop),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Declaration(d) => d.span,
            Stmt::Assignment(a) => a.span,
            Stmt::Conditional(c) => c.span,
            Stmt::Loop(l) => l.span,
        }
    }
}

/// Root of the tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}
