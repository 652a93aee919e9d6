//! 核心中间表示
//!
//! 定义基本块 IR、插入点构建器以及 AST 到 IR 的生成器。

pub mod ir;
pub mod ir_builder;
pub mod ir_gen;

#[cfg(test)]
mod tests;

pub use ir::*;
pub use ir_builder::{BuilderError, IrBuilder};
pub use ir_gen::{generate_ir, CodegenError, IrGenerator};
