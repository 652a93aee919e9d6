//! Host side of the runtime primitives
//!
//! Generated code calls `main_write` after every assignment and may call
//! `main_read` to obtain an integer. A [`Runtime`] supplies both.

use crate::backends::interpreter::frames::Value;
use crate::backends::{ExecutorError, ExecutorResult};
use crate::middle::core::ir::{READ_FN, WRITE_FN};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// `write`/`read` primitives
pub trait Runtime {
    /// Report a freshly assigned value
    fn write(
        &mut self,
        value: i32,
    ) -> ExecutorResult<()>;

    /// Prompt for and parse one integer
    fn read(
        &mut self,
        prompt: &str,
    ) -> ExecutorResult<i32>;
}

/// Parse one line of user input
pub fn parse_input(line: &str) -> ExecutorResult<i32> {
    let trimmed = line.trim();
    trimmed.parse().map_err(|_| ExecutorError::InvalidInput {
        input: trimmed.to_string(),
    })
}

/// Runtime over a reader and a writer
///
/// Uses the same wording as the C runtime the language was first paired
/// with: `The result is: N` and `Enter a value for S: `.
pub struct StdRuntime<R, W> {
    input: R,
    output: W,
}

impl StdRuntime<io::StdinLock<'static>, io::Stdout> {
    /// Runtime over the process' stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdRuntime<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Runtime for StdRuntime<R, W> {
    fn write(
        &mut self,
        value: i32,
    ) -> ExecutorResult<()> {
        writeln!(self.output, "The result is: {}", value)?;
        Ok(())
    }

    fn read(
        &mut self,
        prompt: &str,
    ) -> ExecutorResult<i32> {
        write!(self.output, "Enter a value for {}: ", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        parse_input(&line)
    }
}

/// Runtime that records writes and serves queued inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingRuntime {
    /// Every value passed to `write`, in order
    pub writes: Vec<i32>,
    /// Values handed out by `read`
    pub inputs: VecDeque<i32>,
    /// Prompts passed to `read`
    pub prompts: Vec<String>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_inputs(
        mut self,
        inputs: impl IntoIterator<Item = i32>,
    ) -> Self {
        self.inputs.extend(inputs);
        self
    }
}

impl Runtime for RecordingRuntime {
    fn write(
        &mut self,
        value: i32,
    ) -> ExecutorResult<()> {
        self.writes.push(value);
        Ok(())
    }

    fn read(
        &mut self,
        prompt: &str,
    ) -> ExecutorResult<i32> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or_else(|| ExecutorError::InvalidInput {
            input: String::new(),
        })
    }
}

/// Dispatch a call to a runtime primitive by name
pub fn call_primitive(
    runtime: &mut dyn Runtime,
    func: &str,
    args: &[Value],
) -> ExecutorResult<Option<Value>> {
    match (func, args) {
        (WRITE_FN, [Value::Int(v)]) => {
            runtime.write(*v)?;
            Ok(None)
        }
        (READ_FN, [Value::Str(prompt)]) => Ok(Some(Value::Int(runtime.read(prompt)?))),
        (WRITE_FN | READ_FN, _) => Err(ExecutorError::InvalidOperand(format!(
            "bad arguments to @{}: {:?}",
            func, args
        ))),
        _ => Err(ExecutorError::FunctionNotFound(func.to_string())),
    }
}
