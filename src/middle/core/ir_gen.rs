//! AST 到 IR 的代码生成器
//!
//! 将抽象语法树（AST）转换为基本块形式的中间表示（IR）。
//! 单次遍历，按程序顺序维护符号表；遇到第一个语义错误即停止。

use crate::frontend::config::CompileConfig;
use crate::frontend::core::parser::ast::*;
use crate::middle::core::ir::{
    Instruction, IrType, ModuleIR, Operand, Terminator, WRITE_FN,
};
use crate::middle::core::ir_builder::{BuilderError, IrBuilder};
use crate::util::diagnostic::{Diagnostic, ErrorCodeDefinition};
use crate::util::span::Span;
use indexmap::IndexMap;

/// 代码生成错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("Use of undeclared variable '{name}'")]
    UndeclaredVariable { name: String, span: Span },

    #[error("Variable '{name}' is already declared")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("Invalid exponent: {reason}")]
    InvalidExponent { reason: String, span: Span },

    #[error("Internal compiler error: {message}")]
    Internal { message: String },
}

impl From<BuilderError> for CodegenError {
    fn from(e: BuilderError) -> Self {
        CodegenError::Internal {
            message: e.to_string(),
        }
    }
}

impl CodegenError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CodegenError::UndeclaredVariable { span, .. }
            | CodegenError::DuplicateDeclaration { span, .. }
            | CodegenError::InvalidExponent { span, .. } => Some(*span),
            CodegenError::Internal { .. } => None,
        }
    }

    /// 转换为 Diagnostic
    pub fn to_diagnostic(
        &self,
        max_exponent: Option<u32>,
    ) -> Diagnostic {
        let builder = match self {
            CodegenError::UndeclaredVariable { name, .. } => {
                ErrorCodeDefinition::undeclared_variable(name)
            }
            CodegenError::DuplicateDeclaration { name, .. } => {
                ErrorCodeDefinition::duplicate_declaration(name)
            }
            CodegenError::InvalidExponent { reason, .. } => {
                ErrorCodeDefinition::invalid_exponent(reason, max_exponent)
            }
            CodegenError::Internal { message } => ErrorCodeDefinition::internal_error(message),
        };
        match self.span() {
            Some(span) => builder.at(span).build(),
            None => builder.build(),
        }
    }
}

type Result<T> = std::result::Result<T, CodegenError>;

/// AST 到 IR 的生成器
///
/// 每个编译单元使用一个新的生成器；符号表只由声明填充。
#[derive(Debug)]
pub struct IrGenerator {
    builder: IrBuilder,
    /// 符号表：变量名 -> 存储槽
    symbols: IndexMap<String, usize>,
    module_name: String,
    max_exponent: Option<u32>,
}

impl Default for IrGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IrGenerator {
    /// 创建新的 IR 生成器
    pub fn new() -> Self {
        Self::with_config(&CompileConfig::default())
    }

    /// 使用配置创建 IR 生成器
    pub fn with_config(config: &CompileConfig) -> Self {
        Self {
            builder: IrBuilder::new("main", IrType::I32),
            symbols: IndexMap::new(),
            module_name: config.module_name.clone(),
            max_exponent: config.max_exponent,
        }
    }

    /// 生成模块 IR
    pub fn generate(
        mut self,
        program: &Program,
    ) -> Result<ModuleIR> {
        tracing::debug!("Generating IR for {} statement(s)", program.stmts.len());

        for stmt in &program.stmts {
            self.gen_stmt(stmt)?;
        }
        self.builder.term(Terminator::Ret(Some(Operand::int(0))))?;

        let function = self.builder.finish()?;
        tracing::debug!(
            "IR generated: {} block(s), {} slot(s), {} temp(s)",
            function.blocks.len(),
            function.slots.len(),
            function.temps.len()
        );

        let mut module = ModuleIR::with_runtime_externs(self.module_name);
        module.functions.push(function);
        Ok(module)
    }

    fn gen_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> Result<()> {
        match stmt {
            Stmt::Declaration(decl) => self.gen_declaration(decl),
            Stmt::Assignment(assign) => self.gen_assignment(assign),
            Stmt::Conditional(cond) => self.gen_conditional(cond),
            Stmt::Loop(lp) => self.gen_loop(lp),
        }
    }

    /// 查找变量
    fn lookup(
        &self,
        name: &str,
        span: Span,
    ) -> Result<usize> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| CodegenError::UndeclaredVariable {
                name: name.to_string(),
                span,
            })
    }

    fn gen_declaration(
        &mut self,
        decl: &Declaration,
    ) -> Result<()> {
        let init = decl.init.as_ref().map(|e| self.gen_expr(e)).transpose()?;

        for ident in &decl.names {
            if self.symbols.contains_key(&ident.name) {
                return Err(CodegenError::DuplicateDeclaration {
                    name: ident.name.clone(),
                    span: ident.span,
                });
            }
            let slot = self.builder.alloca(&ident.name)?;
            if let Some(value) = &init {
                self.builder.emit(Instruction::Store {
                    slot,
                    src: value.clone(),
                })?;
            }
            tracing::trace!("declared '{}' as slot {}", ident.name, slot);
            self.symbols.insert(ident.name.clone(), slot);
        }
        Ok(())
    }

    fn gen_assignment(
        &mut self,
        assign: &Assignment,
    ) -> Result<()> {
        let slot = self.lookup(&assign.target.name, assign.target.span)?;
        let rhs = self.gen_expr(&assign.value)?;

        let value = match assign.op.binop() {
            None => rhs,
            Some(op) => {
                let old = self.builder.new_temp(IrType::I32);
                self.builder.emit(Instruction::Load {
                    dst: old.clone(),
                    slot,
                })?;
                self.gen_arith(op, old, rhs)?
            }
        };

        self.builder.emit(Instruction::Store {
            slot,
            src: value.clone(),
        })?;
        self.builder.emit(Instruction::Call {
            dst: None,
            func: WRITE_FN.to_string(),
            args: vec![value],
        })?;
        Ok(())
    }

    fn gen_expr(
        &mut self,
        expr: &Expr,
    ) -> Result<Operand> {
        match expr {
            Expr::Int(value, _) => Ok(Operand::int(*value)),
            Expr::Var(name, span) => {
                let slot = self.lookup(name, *span)?;
                let dst = self.builder.new_temp(IrType::I32);
                self.builder.emit(Instruction::Load {
                    dst: dst.clone(),
                    slot,
                })?;
                Ok(dst)
            }
            Expr::BinOp {
                op: BinOp::Pow,
                left,
                right,
                ..
            } => self.gen_pow(left, right),
            Expr::BinOp {
                op, left, right, ..
            } => {
                let lhs = self.gen_expr(left)?;
                let rhs = self.gen_expr(right)?;
                self.gen_arith(*op, lhs, rhs)
            }
        }
    }

    /// 乘方：指数必须是非负字面量，展开为乘法序列
    fn gen_pow(
        &mut self,
        base: &Expr,
        exponent: &Expr,
    ) -> Result<Operand> {
        // 底数先于指数检查，错误按从左到右报告
        let base = self.gen_expr(base)?;

        let count = match exponent {
            Expr::Int(k, span) => {
                let count = u32::try_from(*k).map_err(|_| CodegenError::InvalidExponent {
                    reason: format!("{} is negative", k),
                    span: *span,
                })?;
                if let Some(max) = self.max_exponent.filter(|max| count > *max) {
                    return Err(CodegenError::InvalidExponent {
                        reason: format!("{} exceeds the limit of {}", count, max),
                        span: *span,
                    });
                }
                count
            }
            other => {
                return Err(CodegenError::InvalidExponent {
                    reason: "exponent must be an integer literal".to_string(),
                    span: other.span(),
                })
            }
        };

        if count == 0 {
            return Ok(Operand::int(1));
        }

        let mut acc = Operand::int(1);
        for _ in 0..count {
            acc = self.gen_arith(BinOp::Mul, acc, base.clone())?;
        }
        Ok(acc)
    }

    fn gen_arith(
        &mut self,
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    ) -> Result<Operand> {
        let dst = self.builder.new_temp(IrType::I32);
        let d = dst.clone();
        let inst = match op {
            BinOp::Add => Instruction::Add { dst: d, lhs, rhs },
            BinOp::Sub => Instruction::Sub { dst: d, lhs, rhs },
            BinOp::Mul => Instruction::Mul { dst: d, lhs, rhs },
            BinOp::Div => Instruction::Div { dst: d, lhs, rhs },
            BinOp::Mod => Instruction::Mod { dst: d, lhs, rhs },
            BinOp::Pow => {
                return Err(CodegenError::Internal {
                    message: "'^' must be unrolled before arithmetic lowering".to_string(),
                })
            }
        };
        self.builder.emit(inst)?;
        Ok(dst)
    }

    fn gen_condition(
        &mut self,
        cond: &Condition,
    ) -> Result<Operand> {
        let lhs = self.gen_expr(&cond.left)?;
        let rhs = self.gen_expr(&cond.right)?;
        let dst = self.builder.new_temp(IrType::I1);
        let d = dst.clone();
        let inst = match cond.op {
            RelOp::Eq => Instruction::Eq { dst: d, lhs, rhs },
            RelOp::Ne => Instruction::Ne { dst: d, lhs, rhs },
            RelOp::Gt => Instruction::Gt { dst: d, lhs, rhs },
            RelOp::Lt => Instruction::Lt { dst: d, lhs, rhs },
            RelOp::Ge => Instruction::Ge { dst: d, lhs, rhs },
            RelOp::Le => Instruction::Le { dst: d, lhs, rhs },
        };
        self.builder.emit(inst)?;
        Ok(dst)
    }

    /// 两侧都求值，再按位组合（不短路）
    fn gen_logical(
        &mut self,
        cond: &LogicalCondition,
    ) -> Result<Operand> {
        match cond {
            LogicalCondition::Rel(c) => self.gen_condition(c),
            LogicalCondition::Logical {
                op, left, right, ..
            } => {
                let lhs = self.gen_logical(left)?;
                let rhs = self.gen_logical(right)?;
                let dst = self.builder.new_temp(IrType::I1);
                let d = dst.clone();
                let inst = match op {
                    LogicalOp::And => Instruction::And { dst: d, lhs, rhs },
                    LogicalOp::Or => Instruction::Or { dst: d, lhs, rhs },
                };
                self.builder.emit(inst)?;
                Ok(dst)
            }
        }
    }

    fn gen_block(
        &mut self,
        block: &Block,
    ) -> Result<()> {
        for assign in &block.stmts {
            self.gen_assignment(assign)?;
        }
        Ok(())
    }

    fn gen_conditional(
        &mut self,
        cond: &Conditional,
    ) -> Result<()> {
        let then_bb = self.builder.new_block("if.then");
        let elif_bbs: Vec<(usize, usize)> = cond
            .elif_branches
            .iter()
            .map(|_| {
                let test = self.builder.new_block("elif.cond");
                let body = self.builder.new_block("elif.then");
                (test, body)
            })
            .collect();
        let else_bb = cond
            .else_block
            .as_ref()
            .map(|_| self.builder.new_block("if.else"));
        let end_bb = self.builder.new_block("if.end");

        // 条件为假时的去向：下一个 elif 测试块、else 块或汇合块
        let fallthrough = |i: usize| -> usize {
            elif_bbs
                .get(i)
                .map(|(test, _)| *test)
                .or(else_bb)
                .unwrap_or(end_bb)
        };

        let c = self.gen_logical(&cond.then_branch.condition)?;
        self.builder.term(Terminator::Branch {
            cond: c,
            then_block: then_bb,
            else_block: fallthrough(0),
        })?;
        self.builder.set_block(then_bb)?;
        self.gen_block(&cond.then_branch.body)?;
        self.builder.term(Terminator::Jmp(end_bb))?;

        for (i, (branch, (test_bb, body_bb))) in
            cond.elif_branches.iter().zip(&elif_bbs).enumerate()
        {
            self.builder.set_block(*test_bb)?;
            let c = self.gen_logical(&branch.condition)?;
            self.builder.term(Terminator::Branch {
                cond: c,
                then_block: *body_bb,
                else_block: fallthrough(i + 1),
            })?;
            self.builder.set_block(*body_bb)?;
            self.gen_block(&branch.body)?;
            self.builder.term(Terminator::Jmp(end_bb))?;
        }

        if let (Some(block), Some(bb)) = (&cond.else_block, else_bb) {
            self.builder.set_block(bb)?;
            self.gen_block(block)?;
            self.builder.term(Terminator::Jmp(end_bb))?;
        }

        self.builder.set_block(end_bb)?;
        Ok(())
    }

    fn gen_loop(
        &mut self,
        lp: &Loop,
    ) -> Result<()> {
        let cond_bb = self.builder.new_block("loopc.cond");
        let body_bb = self.builder.new_block("loopc.body");
        let end_bb = self.builder.new_block("loopc.end");

        self.builder.term(Terminator::Jmp(cond_bb))?;

        self.builder.set_block(cond_bb)?;
        let c = self.gen_logical(&lp.condition)?;
        self.builder.term(Terminator::Branch {
            cond: c,
            then_block: body_bb,
            else_block: end_bb,
        })?;

        self.builder.set_block(body_bb)?;
        self.gen_block(&lp.body)?;
        self.builder.term(Terminator::Jmp(cond_bb))?;

        self.builder.set_block(end_bb)?;
        Ok(())
    }
}

/// 生成 IR
pub fn generate_ir(
    program: &Program,
    config: &CompileConfig,
) -> Result<ModuleIR> {
    IrGenerator::with_config(config).generate(program)
}

