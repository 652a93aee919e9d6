//! Interpreter backend for calcc IR
//!
//! Walks the basic blocks of `main` directly; no lowering to bytecode.

pub mod executor;
pub mod frames;
pub mod runtime;


pub use executor::Interpreter;
pub use frames::{Frame, Value};
pub use runtime::{RecordingRuntime, Runtime, StdRuntime};
