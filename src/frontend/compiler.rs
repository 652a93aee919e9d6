//! 编译器核心
//!
//! 串联词法分析、语法分析和 IR 生成；每次编译使用新的生成器和符号表。

use crate::middle::core::ir::ModuleIR;
use crate::middle::core::ir_gen::{CodegenError, IrGenerator};
use crate::util::diagnostic::Diagnostic;
use thiserror::Error;
use tracing::debug;

use super::config::CompileConfig;
use super::core::lexer::{self, Lexer, Token};
use super::core::parser::{self, ParseError, Program};

/// 编译器
///
/// # 示例
///
/// ```
/// use calcc::frontend::Compiler;
///
/// let mut compiler = Compiler::new();
/// let module = compiler.compile("demo.calc", "int x = 5; x = x + 3;").unwrap();
/// assert_eq!(module.count_calls("main_write"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    /// 编译配置
    config: CompileConfig,
}

impl Compiler {
    /// 创建新编译器
    #[inline]
    pub fn new() -> Self {
        Self::with_config(CompileConfig::new())
    }

    /// 使用配置创建编译器
    #[inline]
    pub fn with_config(config: CompileConfig) -> Self {
        Self { config }
    }

    /// 获取编译配置
    #[inline]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// 编译源文件
    ///
    /// - `source_name`: 源文件名（用于日志）
    /// - `source`: 源代码
    pub fn compile(
        &mut self,
        source_name: &str,
        source: &str,
    ) -> Result<ModuleIR, CompileError> {
        debug!("Compiling {} ({} bytes)", source_name, source.len());

        let program = self.parse(source)?;
        let module = IrGenerator::with_config(&self.config)
            .generate(&program)
            .map_err(|error| CompileError::Codegen {
                error,
                max_exponent: self.config.max_exponent,
            })?;

        debug!("Compiled {}", source_name);
        Ok(module)
    }

    /// 只进行词法分析
    pub fn lex(
        &self,
        source: &str,
    ) -> Vec<Token> {
        lexer::tokenize(source)
    }

    /// 只进行语法分析
    pub fn parse(
        &self,
        source: &str,
    ) -> Result<Program, CompileError> {
        let mut lexer = Lexer::new(source);
        parser::parse_with(&mut lexer, self.config.error_recovery).map_err(CompileError::Parse)
    }
}

/// 编译错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// 词法或语法错误，至少一个
    #[error("{}", join_errors(.0))]
    Parse(Vec<ParseError>),

    /// 语义错误
    #[error("{error}")]
    Codegen {
        error: CodegenError,
        max_exponent: Option<u32>,
    },
}

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl CompileError {
    /// 转换为诊断列表，非空
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Parse(errors) => errors.iter().map(ParseError::to_diagnostic).collect(),
            CompileError::Codegen {
                error,
                max_exponent,
            } => vec![error.to_diagnostic(*max_exponent)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::config::ErrorRecoveryStrategy;
    use crate::frontend::core::lexer::TokenKind;

    #[test]
    fn test_compile_success() {
        let mut compiler = Compiler::new();
        let module = compiler
            .compile("t.calc", "int x = 0; loopc x < 3 : begin x = x + 1; end")
            .unwrap();
        assert_eq!(module.name, "main");
        assert!(module.function("main").unwrap().verify().is_ok());
    }

    #[test]
    fn test_module_name_from_config() {
        let mut compiler = Compiler::with_config(CompileConfig::new().with_module_name("demo"));
        let module = compiler.compile("t.calc", "").unwrap();
        assert!(module.to_string().starts_with("; ModuleID = 'demo'"));
    }

    #[test]
    fn test_syntax_error_has_one_diagnostic() {
        let mut compiler = Compiler::new();
        let err = compiler.compile("t.calc", "int ;").unwrap_err();
        let diags = err.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "E0002");
        assert!(err.to_string().contains("identifier"));
    }

    #[test]
    fn test_recovery_collects_all_errors() {
        let source = "int ; int x = 1; x = ; x = 2;";
        let mut strict = Compiler::new();
        assert_eq!(
            strict.compile("t.calc", source).unwrap_err().diagnostics().len(),
            1
        );

        let mut recover = Compiler::with_config(
            CompileConfig::new().with_error_recovery(ErrorRecoveryStrategy::SkipStatement),
        );
        assert_eq!(
            recover.compile("t.calc", source).unwrap_err().diagnostics().len(),
            2
        );
    }

    #[test]
    fn test_semantic_error_diagnostic() {
        let mut compiler = Compiler::with_config(CompileConfig::new().with_max_exponent(2));
        let err = compiler
            .compile("t.calc", "int x = 2; x = x ^ 3;")
            .unwrap_err();
        let diags = err.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "E1003");
        assert!(diags[0].help.contains("between 0 and 2"));
        assert!(diags[0].span.is_some());
    }

    #[test]
    fn test_large_exponent_without_cap() {
        let mut compiler = Compiler::new();
        let module = compiler.compile("t.calc", "int x = 1; x = x ^ 100;").unwrap();
        assert!(module.function("main").unwrap().verify().is_ok());
    }

    #[test]
    fn test_lex_only() {
        let tokens = Compiler::new().lex("int x;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }
}
