//! 统一诊断系统
//!
//! 提供诊断数据结构、错误码注册表和渲染器
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity)
//! - [`codes`] - 错误码注册表与构建器
//!
//! # 示例
//!
//! ```ignore
//! use calcc::util::diagnostic::DiagnosticRenderer;
//!
//! let renderer = DiagnosticRenderer::new();
//! let output = renderer.render(&diagnostic, Some(&source_file));
//! eprintln!("{}", output);
//! ```

pub mod codes;
pub mod error;

pub use codes::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
pub use error::{Diagnostic, Severity};

use crate::util::span::SourceFile;
use owo_colors::OwoColorize;

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 是否显示帮助信息
    pub show_help: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
        }
    }
}

/// 诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct DiagnosticRenderer {
    config: EmitterConfig,
}

impl DiagnosticRenderer {
    /// 创建新的渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 禁用颜色
    #[inline]
    pub fn without_colors(mut self) -> Self {
        self.config.use_colors = false;
        self
    }

    /// 渲染单个诊断信息
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = self.render_header(diagnostic);

        if self.config.show_source {
            if let Some(file) = source_file {
                output.push_str(&self.render_snippet(diagnostic, file));
            }
        }

        if self.config.show_help && !diagnostic.help.is_empty() {
            let label = self.paint_help("help");
            output.push_str(&format!("     = {}: {}\n", label, diagnostic.help));
        }

        output
    }

    /// 渲染多个诊断信息
    pub fn render_all<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        source_file: Option<&SourceFile>,
    ) -> String {
        diagnostics
            .into_iter()
            .map(|d| self.render(d, source_file))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let head = format!("{}[{}]", diagnostic.severity, diagnostic.code);
        let head = if self.config.use_colors {
            match diagnostic.severity {
                Severity::Error => head.red().bold().to_string(),
                Severity::Warning => head.yellow().bold().to_string(),
                Severity::Note => head.cyan().bold().to_string(),
            }
        } else {
            head
        };
        format!("{}: {}\n", head, diagnostic.message)
    }

    /// 位置行、源码行和插入符下划线
    fn render_snippet(
        &self,
        diagnostic: &Diagnostic,
        file: &SourceFile,
    ) -> String {
        let Some(span) = diagnostic.span.filter(|s| !s.is_dummy()) else {
            return String::new();
        };

        let mut output = format!(
            "  {} {}:{}:{}\n",
            self.paint_gutter("-->"),
            file.name,
            span.start.line,
            span.start.column
        );

        let Some(line) = file.line(span.start.line) else {
            return output;
        };

        let width = if span.end.line == span.start.line {
            span.end.column.saturating_sub(span.start.column)
        } else {
            line.len().saturating_sub(span.start.column - 1)
        };
        let width = width.max(1);

        let bar = self.paint_gutter("|");
        let carets = "^".repeat(width);
        let carets = if self.config.use_colors {
            carets.red().bold().to_string()
        } else {
            carets
        };

        output.push_str(&format!("     {}\n", bar));
        output.push_str(&format!(
            "{} {} {}\n",
            self.paint_gutter(&format!("{:>4}", span.start.line)),
            bar,
            line
        ));
        output.push_str(&format!(
            "     {} {}{}\n",
            bar,
            " ".repeat(span.start.column.saturating_sub(1)),
            carets
        ));
        output
    }

    fn paint_gutter(
        &self,
        text: &str,
    ) -> String {
        if self.config.use_colors {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_help(
        &self,
        text: &str,
    ) -> String {
        if self.config.use_colors {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
