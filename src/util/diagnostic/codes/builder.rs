//! 通用诊断构建器
//!
//! 支持模板参数化的错误消息构建器

use crate::util::diagnostic::Diagnostic;
use crate::util::span::Span;

/// 诊断构建器（支持模板参数）
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    code: &'static str,
    message_template: &'static str,
    help: &'static str,
    params: Vec<(&'static str, String)>,
    span: Option<Span>,
}

impl DiagnosticBuilder {
    /// 创建新的诊断构建器
    pub fn new(
        code: &'static str,
        template: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            code,
            message_template: template,
            help,
            params: Vec::new(),
            span: None,
        }
    }

    /// 添加模板参数
    pub fn param(
        mut self,
        key: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// 设置位置
    #[inline]
    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        self.span = Some(span);
        self
    }

    /// 构建 Diagnostic
    pub fn build(&self) -> Diagnostic {
        let message = render(self.message_template, &self.params);
        let help = render(self.help, &self.params);
        Diagnostic::error(self.code.to_string(), message, help, self.span)
    }
}

/// 用参数替换模板中的 `{key}` 占位符
///
/// 未知占位符原样保留。
pub(crate) fn render(
    template: &str,
    params: &[(&'static str, String)],
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
