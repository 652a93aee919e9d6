//! Interpreter executor for calcc IR
//!
//! Executes the blocks of `main` one at a time: every instruction of the
//! current block, then its terminator picks the next block.

use crate::backends::interpreter::frames::{Frame, Value};
use crate::backends::interpreter::runtime::{call_primitive, Runtime};
use crate::backends::{ExecutionState, Executor, ExecutorConfig, ExecutorError, ExecutorResult};
use crate::middle::core::ir::{FunctionIR, Instruction, ModuleIR, Operand, Terminator};

/// The calcc IR interpreter
#[derive(Debug, Default)]
pub struct Interpreter {
    /// Current execution state
    state: ExecutionState,
    /// Configuration
    config: ExecutorConfig,
}

impl Interpreter {
    /// Create a new interpreter with default configuration
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an interpreter with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self {
            state: ExecutionState::default(),
            config,
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run `main` of `module`, returning its exit value
    pub fn run(
        &mut self,
        module: &ModuleIR,
        runtime: &mut dyn Runtime,
    ) -> ExecutorResult<i32> {
        self.execute_module(module, runtime)
    }

    /// Count one step against the limit
    fn tick(&mut self) -> ExecutorResult<()> {
        self.state.steps += 1;
        if self.state.steps > self.config.max_steps {
            return Err(ExecutorError::StepLimitExceeded {
                limit: self.config.max_steps,
            });
        }
        Ok(())
    }

    fn execute_function(
        &mut self,
        module: &ModuleIR,
        function: &FunctionIR,
        runtime: &mut dyn Runtime,
    ) -> ExecutorResult<i32> {
        let mut frame = Frame::new(function);

        loop {
            let block = function
                .blocks
                .get(frame.block)
                .ok_or(ExecutorError::InvalidBlock(frame.block))?;
            self.state.current_block = block.label;
            tracing::trace!("enter block {}", block.name);

            for inst in &block.instructions {
                self.tick()?;
                self.exec_instruction(module, &mut frame, inst, runtime)?;
            }

            self.tick()?;
            match &block.terminator {
                Some(Terminator::Jmp(target)) => frame.block = *target,
                Some(Terminator::Branch {
                    cond,
                    then_block,
                    else_block,
                }) => {
                    frame.block = if frame.eval_bool(cond)? {
                        *then_block
                    } else {
                        *else_block
                    };
                }
                Some(Terminator::Ret(value)) => {
                    let code = match value {
                        Some(v) => frame.eval_int(v)?,
                        None => 0,
                    };
                    tracing::debug!(
                        "{} returned {} after {} step(s)",
                        function.name,
                        code,
                        self.state.steps
                    );
                    return Ok(code);
                }
                None => {
                    return Err(ExecutorError::InvalidOperand(format!(
                        "block {} has no terminator",
                        block.name
                    )))
                }
            }
        }
    }

    fn exec_instruction(
        &mut self,
        module: &ModuleIR,
        frame: &mut Frame,
        inst: &Instruction,
        runtime: &mut dyn Runtime,
    ) -> ExecutorResult<()> {
        match inst {
            Instruction::Alloca { slot } => frame.store(*slot, 0),
            Instruction::Load { dst, slot } => {
                let v = frame.load(*slot)?;
                frame.define(dst, Value::Int(v))
            }
            Instruction::Store { slot, src } => {
                let v = frame.eval_int(src)?;
                frame.store(*slot, v)
            }
            Instruction::Add { dst, lhs, rhs } => {
                self.arith(frame, dst, lhs, rhs, |a, b| Ok(a.wrapping_add(b)))
            }
            Instruction::Sub { dst, lhs, rhs } => {
                self.arith(frame, dst, lhs, rhs, |a, b| Ok(a.wrapping_sub(b)))
            }
            Instruction::Mul { dst, lhs, rhs } => {
                self.arith(frame, dst, lhs, rhs, |a, b| Ok(a.wrapping_mul(b)))
            }
            Instruction::Div { dst, lhs, rhs } => self.arith(frame, dst, lhs, rhs, |a, b| {
                if b == 0 {
                    Err(ExecutorError::DivisionByZero)
                } else {
                    Ok(a.wrapping_div(b))
                }
            }),
            Instruction::Mod { dst, lhs, rhs } => self.arith(frame, dst, lhs, rhs, |a, b| {
                if b == 0 {
                    Err(ExecutorError::DivisionByZero)
                } else {
                    Ok(a.wrapping_rem(b))
                }
            }),
            Instruction::Eq { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a == b),
            Instruction::Ne { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a != b),
            Instruction::Lt { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a < b),
            Instruction::Le { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a <= b),
            Instruction::Gt { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a > b),
            Instruction::Ge { dst, lhs, rhs } => self.compare(frame, dst, lhs, rhs, |a, b| a >= b),
            Instruction::And { dst, lhs, rhs } => {
                let v = frame.eval_bool(lhs)? & frame.eval_bool(rhs)?;
                frame.define(dst, Value::Bool(v))
            }
            Instruction::Or { dst, lhs, rhs } => {
                let v = frame.eval_bool(lhs)? | frame.eval_bool(rhs)?;
                frame.define(dst, Value::Bool(v))
            }
            Instruction::Call { dst, func, args } => {
                if module.extern_decl(func).is_none() {
                    return Err(ExecutorError::FunctionNotFound(func.clone()));
                }
                let args = args
                    .iter()
                    .map(|a| frame.eval(a))
                    .collect::<ExecutorResult<Vec<_>>>()?;
                tracing::trace!("call @{}({:?})", func, args);
                let result = call_primitive(runtime, func, &args)?;
                match (dst, result) {
                    (Some(dst), Some(value)) => frame.define(dst, value),
                    (None, _) => Ok(()),
                    (Some(_), None) => Err(ExecutorError::InvalidOperand(format!(
                        "@{} returns void",
                        func
                    ))),
                }
            }
        }
    }

    fn arith(
        &self,
        frame: &mut Frame,
        dst: &Operand,
        lhs: &Operand,
        rhs: &Operand,
        op: impl Fn(i32, i32) -> ExecutorResult<i32>,
    ) -> ExecutorResult<()> {
        let v = op(frame.eval_int(lhs)?, frame.eval_int(rhs)?)?;
        frame.define(dst, Value::Int(v))
    }

    fn compare(
        &self,
        frame: &mut Frame,
        dst: &Operand,
        lhs: &Operand,
        rhs: &Operand,
        op: impl Fn(i32, i32) -> bool,
    ) -> ExecutorResult<()> {
        let v = op(frame.eval_int(lhs)?, frame.eval_int(rhs)?);
        frame.define(dst, Value::Bool(v))
    }
}

impl Executor for Interpreter {
    fn execute_module(
        &mut self,
        module: &ModuleIR,
        runtime: &mut dyn Runtime,
    ) -> ExecutorResult<i32> {
        self.reset();
        let main = module
            .function("main")
            .ok_or_else(|| ExecutorError::FunctionNotFound("main".to_string()))?;
        tracing::debug!("Executing module '{}'", module.name);

        self.state.current_function = Some(main.name.clone());
        let code = self.execute_function(module, main, runtime)?;
        self.state.is_complete = true;
        Ok(code)
    }

    fn reset(&mut self) {
        self.state = ExecutionState::default();
    }

    fn state(&self) -> &ExecutionState {
        &self.state
    }
}
