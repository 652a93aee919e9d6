//! IR 生成测试
//!
//! - lowering: 声明、赋值、算术、乘方
//! - control_flow: 条件与循环的块结构
//! - errors: 语义错误
//! - printer: 文本形式


use crate::frontend::config::CompileConfig;
use crate::frontend::core::parser::parse_source;
use crate::middle::core::{generate_ir, CodegenError, FunctionIR, ModuleIR};

pub(super) fn try_lower(source: &str) -> Result<ModuleIR, CodegenError> {
    let program = parse_source(source).expect("source should parse");
    generate_ir(&program, &CompileConfig::default())
}

pub(super) fn lower(source: &str) -> ModuleIR {
    try_lower(source).expect("source should lower")
}

pub(super) fn main_fn(module: &ModuleIR) -> &FunctionIR {
    module.function("main").expect("main should exist")
}
