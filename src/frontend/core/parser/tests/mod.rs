//! Parser tests
//!
//! - statements: 声明、赋值、条件、循环
//! - expressions: 优先级与结合性
//! - recovery: 错误报告与恢复策略

mod recovery;

use crate::frontend::core::parser::{parse_source, Program};

pub(super) fn parse_ok(source: &str) -> Program {
    match parse_source(source) {
        Ok(program) => program,
        Err(errors) => panic!("unexpected parse errors for {:?}: {:?}", source, errors),
    }
}
