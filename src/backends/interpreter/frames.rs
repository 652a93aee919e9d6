//! Call frame for the interpreter
//!
//! Holds slot storage, temp values and the block being executed.

use crate::backends::{ExecutorError, ExecutorResult};
use crate::middle::core::ir::{ConstValue, FunctionIR, Operand};
use std::fmt;

/// A runtime value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Str(String),
}

impl From<&ConstValue> for Value {
    fn from(c: &ConstValue) -> Self {
        match c {
            ConstValue::Int(v) => Value::Int(*v),
            ConstValue::Bool(b) => Value::Bool(*b),
            ConstValue::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// Frame for one function activation
#[derive(Debug, Clone)]
pub struct Frame {
    /// Slot values, indexed by slot id
    slots: Vec<i32>,
    /// Temp values; `None` until defined
    temps: Vec<Option<Value>>,
    /// Label of the block being executed
    pub block: usize,
}

impl Frame {
    /// Create a frame with every slot zeroed and no temps defined
    pub fn new(function: &FunctionIR) -> Self {
        Self {
            slots: vec![0; function.slots.len()],
            temps: vec![None; function.temps.len()],
            block: function.entry,
        }
    }

    pub fn load(
        &self,
        slot: usize,
    ) -> ExecutorResult<i32> {
        self.slots
            .get(slot)
            .copied()
            .ok_or_else(|| ExecutorError::InvalidOperand(format!("slot {}", slot)))
    }

    pub fn store(
        &mut self,
        slot: usize,
        value: i32,
    ) -> ExecutorResult<()> {
        let cell = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| ExecutorError::InvalidOperand(format!("slot {}", slot)))?;
        *cell = value;
        Ok(())
    }

    /// Value of an operand
    pub fn eval(
        &self,
        operand: &Operand,
    ) -> ExecutorResult<Value> {
        match operand {
            Operand::Const(c) => Ok(Value::from(c)),
            Operand::Temp(t) => self
                .temps
                .get(*t)
                .and_then(|v| v.clone())
                .ok_or_else(|| ExecutorError::InvalidOperand(format!("%t{} is undefined", t))),
        }
    }

    pub fn eval_int(
        &self,
        operand: &Operand,
    ) -> ExecutorResult<i32> {
        match self.eval(operand)? {
            Value::Int(v) => Ok(v),
            other => Err(ExecutorError::InvalidOperand(format!(
                "expected i32, found {}",
                other
            ))),
        }
    }

    pub fn eval_bool(
        &self,
        operand: &Operand,
    ) -> ExecutorResult<bool> {
        match self.eval(operand)? {
            Value::Bool(b) => Ok(b),
            other => Err(ExecutorError::InvalidOperand(format!(
                "expected i1, found {}",
                other
            ))),
        }
    }

    /// Define the temp named by `dst`
    pub fn define(
        &mut self,
        dst: &Operand,
        value: Value,
    ) -> ExecutorResult<()> {
        let cell = dst
            .as_temp()
            .and_then(|t| self.temps.get_mut(t))
            .ok_or_else(|| {
                ExecutorError::InvalidOperand(format!("{} is not a temp destination", dst))
            })?;
        *cell = Some(value);
        Ok(())
    }

    /// Current slot values
    pub fn slots(&self) -> &[i32] {
        &self.slots
    }
}
