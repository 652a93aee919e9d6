//! 诊断数据结构
//!
//! 提供统一的错误报告机制
//!
//! - `Diagnostic` 的 `message` 和 `help` 在构建时已渲染完成
//! - 只通过 `DiagnosticBuilder` 创建诊断，所有错误码都在注册表中登记
//!
//! ```ignore
//! ErrorCodeDefinition::undeclared_variable("x")
//!     .at(span)
//!     .build();
//! ```

use crate::util::span::Span;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    /// 检查是否为错误级别
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// 诊断信息（message 已渲染完成）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 严重级别
    pub severity: Severity,
    /// 错误码
    pub code: String,
    /// 完整消息
    pub message: String,
    /// 帮助信息，可能为空
    pub help: String,
    /// 位置信息
    pub span: Option<Span>,
}

impl Diagnostic {
    /// 创建错误诊断
    ///
    /// `pub(crate)`: 仅由 `DiagnosticBuilder::build()` 调用。
    pub(crate) fn error(
        code: String,
        message: String,
        help: String,
        span: Option<Span>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message,
            help,
            span,
        }
    }

    /// 是否为错误
    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(span) = self.span.filter(|s| !s.is_dummy()) {
            write!(f, " at {}", span.start)?;
        }
        Ok(())
    }
}
