//! Execution backends for calcc IR
//!
//! Only the reference interpreter exists today. It runs `main` of a
//! [`ModuleIR`] and routes the two runtime primitives through a [`Runtime`].
//!
//! ```text
//! ModuleIR (from ir_gen)
//!         |
//!         v
//!    Interpreter ---> Runtime (main_write / main_read)
//!         |
//!         v
//!   exit value (i32)
//! ```

pub mod interpreter;

use crate::middle::core::ir::ModuleIR;
use serde::{Deserialize, Serialize};

pub use interpreter::runtime::{RecordingRuntime, Runtime, StdRuntime};
pub use interpreter::Interpreter;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Runtime faults raised while executing IR
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// `/` or `%` with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,
    /// `main_read` got something that is not an integer
    #[error("Invalid integer input '{input}'")]
    InvalidInput { input: String },
    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
    #[error("Function not found: {0}")]
    FunctionNotFound(String),
    /// Operand of the wrong type, or a temp read before it was defined
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    #[error("Invalid block label: {0}")]
    InvalidBlock(usize),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExecutorError {
    fn from(e: std::io::Error) -> Self {
        ExecutorError::Io(e.to_string())
    }
}

/// Execution state for a running program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionState {
    /// Current function name
    pub current_function: Option<String>,
    /// Label of the block being executed
    pub current_block: usize,
    /// Instructions and terminators executed so far
    pub steps: u64,
    /// Whether execution is complete
    pub is_complete: bool,
}

/// Executor trait - all backends implement this
pub trait Executor {
    /// Run `main` and return its exit value
    fn execute_module(
        &mut self,
        module: &ModuleIR,
        runtime: &mut dyn Runtime,
    ) -> ExecutorResult<i32>;

    /// Reset the executor state
    fn reset(&mut self);

    /// Get current execution state
    fn state(&self) -> &ExecutionState;
}

fn default_max_steps() -> u64 {
    10_000_000
}

/// Configuration for an executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Upper bound on executed instructions, guards against endless `loopc`
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

impl ExecutorConfig {
    #[inline]
    pub fn with_max_steps(
        mut self,
        max_steps: u64,
    ) -> Self {
        self.max_steps = max_steps;
        self
    }
}
