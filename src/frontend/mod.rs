//! Frontend compilation pipeline
//!
//! Lexer and parser turn calculator source into an AST; the [`Compiler`]
//! drives them and hands the tree to IR generation.

pub mod compiler;
pub mod config;
pub mod core;

pub use compiler::{CompileError, Compiler};
pub use config::{CompileConfig, ConfigError, ErrorRecoveryStrategy};
