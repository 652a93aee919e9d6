//! Intermediate Representation
//!
//! A control-flow graph of basic blocks over `i32`/`i1` temporaries and
//! named stack slots. `Display` renders an LLVM-flavoured text form.

use std::fmt;

/// Runtime primitive called after every assignment
pub const WRITE_FN: &str = "main_write";
/// Runtime primitive that prompts for a value
pub const READ_FN: &str = "main_read";

/// Value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    I1,
    I32,
    Ptr,
}

impl fmt::Display for IrType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            IrType::I1 => write!(f, "i1"),
            IrType::I32 => write!(f, "i32"),
            IrType::Ptr => write!(f, "ptr"),
        }
    }
}

/// Constant value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Int(i32),
    Bool(bool),
    /// Prompt text passed to `main_read`
    Str(String),
}

impl ConstValue {
    pub fn ty(&self) -> IrType {
        match self {
            ConstValue::Int(_) => IrType::I32,
            ConstValue::Bool(_) => IrType::I1,
            ConstValue::Str(_) => IrType::Ptr,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ConstValue::Int(v) => write!(f, "{}", v),
            ConstValue::Bool(b) => write!(f, "{}", b),
            ConstValue::Str(s) => write!(f, "c{:?}", s),
        }
    }
}

/// Instruction operand
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Const(ConstValue),
    Temp(usize),
}

impl Operand {
    #[inline]
    pub fn int(value: i32) -> Self {
        Operand::Const(ConstValue::Int(value))
    }

    /// The temp index, if this is a temp
    pub fn as_temp(&self) -> Option<usize> {
        match self {
            Operand::Temp(t) => Some(*t),
            Operand::Const(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Operand::Const(c) => write!(f, "{}", c),
            Operand::Temp(t) => write!(f, "%t{}", t),
        }
    }
}

/// Instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Reserve storage for one `i32` slot
    Alloca {
        slot: usize,
    },
    Load {
        dst: Operand,
        slot: usize,
    },
    Store {
        slot: usize,
        src: Operand,
    },
    Add {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Sub {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Mul {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    /// Signed division
    Div {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    /// Signed remainder
    Mod {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Eq {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Ne {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Lt {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Le {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Gt {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Ge {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    /// Bitwise and on `i1`
    And {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    /// Bitwise or on `i1`
    Or {
        dst: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    Call {
        dst: Option<Operand>,
        func: String,
        args: Vec<Operand>,
    },
}

impl Instruction {
    /// Mnemonic for binary instructions, `None` otherwise
    fn binary_parts(&self) -> Option<(&'static str, &Operand, &Operand, &Operand)> {
        let parts = match self {
            Instruction::Add { dst, lhs, rhs } => ("add i32", dst, lhs, rhs),
            Instruction::Sub { dst, lhs, rhs } => ("sub i32", dst, lhs, rhs),
            Instruction::Mul { dst, lhs, rhs } => ("mul i32", dst, lhs, rhs),
            Instruction::Div { dst, lhs, rhs } => ("sdiv i32", dst, lhs, rhs),
            Instruction::Mod { dst, lhs, rhs } => ("srem i32", dst, lhs, rhs),
            Instruction::Eq { dst, lhs, rhs } => ("icmp eq i32", dst, lhs, rhs),
            Instruction::Ne { dst, lhs, rhs } => ("icmp ne i32", dst, lhs, rhs),
            Instruction::Lt { dst, lhs, rhs } => ("icmp slt i32", dst, lhs, rhs),
            Instruction::Le { dst, lhs, rhs } => ("icmp sle i32", dst, lhs, rhs),
            Instruction::Gt { dst, lhs, rhs } => ("icmp sgt i32", dst, lhs, rhs),
            Instruction::Ge { dst, lhs, rhs } => ("icmp sge i32", dst, lhs, rhs),
            Instruction::And { dst, lhs, rhs } => ("and i1", dst, lhs, rhs),
            Instruction::Or { dst, lhs, rhs } => ("or i1", dst, lhs, rhs),
            Instruction::Alloca { .. }
            | Instruction::Load { .. }
            | Instruction::Store { .. }
            | Instruction::Call { .. } => return None,
        };
        Some(parts)
    }

    /// Is this a call to `func`
    pub fn is_call_to(
        &self,
        func: &str,
    ) -> bool {
        matches!(self, Instruction::Call { func: f, .. } if f == func)
    }
}

/// Block terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    Jmp(usize),
    Branch {
        cond: Operand,
        then_block: usize,
        else_block: usize,
    },
    Ret(Option<Operand>),
}

impl Terminator {
    /// Target blocks, in branch order
    pub fn successors(&self) -> Vec<usize> {
        match self {
            Terminator::Jmp(target) => vec![*target],
            Terminator::Branch {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            Terminator::Ret(_) => Vec::new(),
        }
    }
}

/// Basic block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    /// Index in `FunctionIR::blocks`
    pub label: usize,
    /// Unique printable name (`entry`, `if.then`, `loopc.cond1`, ...)
    pub name: String,
    pub instructions: Vec<Instruction>,
    /// `None` while the block is still open
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(
        label: usize,
        name: impl Into<String>,
    ) -> Self {
        Self {
            label,
            name: name.into(),
            instructions: Vec::new(),
            terminator: None,
        }
    }

    pub fn successors(&self) -> Vec<usize> {
        self.terminator
            .as_ref()
            .map(Terminator::successors)
            .unwrap_or_default()
    }
}

/// Structural defects found by [`FunctionIR::verify`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("function '{0}' has no entry block")]
    MissingEntry(String),
    #[error("block '{0}' has no terminator")]
    Unterminated(String),
    #[error("block '{block}' branches to missing block {target}")]
    MissingTarget { block: String, target: usize },
    #[error("block '{block}' has label {label}, expected {expected}")]
    LabelMismatch {
        block: String,
        label: usize,
        expected: usize,
    },
}

/// Function IR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionIR {
    pub name: String,
    pub return_type: IrType,
    /// Slot names, indexed by slot id
    pub slots: Vec<String>,
    /// Temp types, indexed by temp id
    pub temps: Vec<IrType>,
    pub blocks: Vec<BasicBlock>,
    pub entry: usize,
}

impl FunctionIR {
    /// 迭代所有指令
    pub fn all_instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks
            .iter()
            .flat_map(|block| block.instructions.iter())
    }

    /// Find a block by name
    pub fn block_named(
        &self,
        name: &str,
    ) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Every block has exactly one terminator and every target exists
    pub fn verify(&self) -> Result<(), VerifyError> {
        if self.entry >= self.blocks.len() {
            return Err(VerifyError::MissingEntry(self.name.clone()));
        }
        for (index, block) in self.blocks.iter().enumerate() {
            if block.label != index {
                return Err(VerifyError::LabelMismatch {
                    block: block.name.clone(),
                    label: block.label,
                    expected: index,
                });
            }
            let Some(term) = &block.terminator else {
                return Err(VerifyError::Unterminated(block.name.clone()));
            };
            if let Some(target) = term
                .successors()
                .into_iter()
                .find(|t| *t >= self.blocks.len())
            {
                return Err(VerifyError::MissingTarget {
                    block: block.name.clone(),
                    target,
                });
            }
        }
        Ok(())
    }

    fn operand_type(
        &self,
        operand: &Operand,
    ) -> IrType {
        match operand {
            Operand::Const(c) => c.ty(),
            Operand::Temp(t) => self.temps.get(*t).copied().unwrap_or(IrType::I32),
        }
    }

    fn slot_name(
        &self,
        slot: usize,
    ) -> &str {
        self.slots
            .get(slot)
            .map(String::as_str)
            .unwrap_or("<missing>")
    }

    fn block_name(
        &self,
        label: usize,
    ) -> &str {
        self.blocks
            .get(label)
            .map(|b| b.name.as_str())
            .unwrap_or("<missing>")
    }

    fn fmt_instruction(
        &self,
        f: &mut fmt::Formatter<'_>,
        inst: &Instruction,
    ) -> fmt::Result {
        if let Some((mnemonic, dst, lhs, rhs)) = inst.binary_parts() {
            return writeln!(f, "  {} = {} {}, {}", dst, mnemonic, lhs, rhs);
        }
        match inst {
            Instruction::Alloca { slot } => {
                writeln!(f, "  %{} = alloca i32", self.slot_name(*slot))
            }
            Instruction::Load { dst, slot } => {
                writeln!(f, "  {} = load i32, ptr %{}", dst, self.slot_name(*slot))
            }
            Instruction::Store { slot, src } => {
                writeln!(f, "  store i32 {}, ptr %{}", src, self.slot_name(*slot))
            }
            Instruction::Call { dst, func, args } => {
                let args: Vec<String> = args
                    .iter()
                    .map(|a| format!("{} {}", self.operand_type(a), a))
                    .collect();
                match dst {
                    Some(dst) => writeln!(
                        f,
                        "  {} = call {} @{}({})",
                        dst,
                        self.operand_type(dst),
                        func,
                        args.join(", ")
                    ),
                    None => writeln!(f, "  call void @{}({})", func, args.join(", ")),
                }
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for FunctionIR {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "define {} @{}() {{", self.return_type, self.name)?;
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", block.name)?;
            for inst in &block.instructions {
                self.fmt_instruction(f, inst)?;
            }
            match &block.terminator {
                Some(Terminator::Jmp(target)) => {
                    writeln!(f, "  br label %{}", self.block_name(*target))?
                }
                Some(Terminator::Branch {
                    cond,
                    then_block,
                    else_block,
                }) => writeln!(
                    f,
                    "  br i1 {}, label %{}, label %{}",
                    cond,
                    self.block_name(*then_block),
                    self.block_name(*else_block)
                )?,
                Some(Terminator::Ret(Some(value))) => {
                    writeln!(f, "  ret {} {}", self.operand_type(value), value)?
                }
                Some(Terminator::Ret(None)) => writeln!(f, "  ret void")?,
                None => writeln!(f, "  ; <unterminated>")?,
            }
        }
        writeln!(f, "}}")
    }
}

/// External function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternDecl {
    pub name: String,
    pub params: Vec<IrType>,
    /// `None` for `void`
    pub ret: Option<IrType>,
}

impl fmt::Display for ExternDecl {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        match self.ret {
            Some(ret) => write!(f, "declare {} @{}({})", ret, self.name, params.join(", ")),
            None => write!(f, "declare void @{}({})", self.name, params.join(", ")),
        }
    }
}

/// Module IR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleIR {
    pub name: String,
    pub externs: Vec<ExternDecl>,
    pub functions: Vec<FunctionIR>,
}

impl ModuleIR {
    /// A module declaring the two runtime primitives
    pub fn with_runtime_externs(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            externs: vec![
                ExternDecl {
                    name: WRITE_FN.to_string(),
                    params: vec![IrType::I32],
                    ret: None,
                },
                ExternDecl {
                    name: READ_FN.to_string(),
                    params: vec![IrType::Ptr],
                    ret: Some(IrType::I32),
                },
            ],
            functions: Vec::new(),
        }
    }

    pub fn function(
        &self,
        name: &str,
    ) -> Option<&FunctionIR> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn extern_decl(
        &self,
        name: &str,
    ) -> Option<&ExternDecl> {
        self.externs.iter().find(|e| e.name == name)
    }

    /// Number of call sites targeting `func`
    pub fn count_calls(
        &self,
        func: &str,
    ) -> usize {
        self.functions
            .iter()
            .flat_map(|f| f.all_instructions())
            .filter(|i| i.is_call_to(func))
            .count()
    }

    /// Number of instructions matching `pred`
    pub fn count_instructions(
        &self,
        pred: impl Fn(&Instruction) -> bool,
    ) -> usize {
        self.functions
            .iter()
            .flat_map(|f| f.all_instructions())
            .filter(|i| pred(i))
            .count()
    }
}

impl fmt::Display for ModuleIR {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        writeln!(f)?;
        for decl in &self.externs {
            writeln!(f, "{}", decl)?;
        }
        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
