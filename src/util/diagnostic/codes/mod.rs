//! 错误码注册表
//!
//! E0xxx: 词法和语法分析
//! E1xxx: 语义分析（代码生成阶段）
//! E9xxx: 编译器内部错误

mod builder;

pub use builder::DiagnosticBuilder;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Lexer,    // E0001
    Parser,   // E0002-E0003
    Semantic, // E1xxx
    Internal, // E9xxx
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexer => write!(f, "Lexer"),
            ErrorCategory::Parser => write!(f, "Parser"),
            ErrorCategory::Semantic => write!(f, "Semantic"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

/// 错误码定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodeDefinition {
    /// 错误码，如 "E1001"
    pub code: &'static str,
    /// 错误类别
    pub category: ErrorCategory,
    /// 消息模板，`{key}` 为参数占位符
    pub message_template: &'static str,
    /// 帮助信息模板
    pub help_template: &'static str,
}

const E0001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0001",
    category: ErrorCategory::Lexer,
    message_template: "Unknown token '{text}'",
    help_template: "Remove the character or replace it with a valid operator",
};

const E0002: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0002",
    category: ErrorCategory::Parser,
    message_template: "Expected {expected}, found {found}",
    help_template: "",
};

const E0003: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0003",
    category: ErrorCategory::Parser,
    message_template: "Integer literal '{text}' does not fit in a 32-bit signed integer",
    help_template: "Integer literals must lie between 0 and 2147483647",
};

const E1001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1001",
    category: ErrorCategory::Semantic,
    message_template: "Use of undeclared variable '{name}'",
    help_template: "Declare it first, e.g. `int {name};`",
};

const E1002: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1002",
    category: ErrorCategory::Semantic,
    message_template: "Variable '{name}' is already declared",
    help_template: "All variables share one global scope; pick a different name",
};

const E1003: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1003",
    category: ErrorCategory::Semantic,
    message_template: "Invalid exponent: {reason}",
    help_template: "The right operand of '^' must be {expected}",
};

const E9001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E9001",
    category: ErrorCategory::Internal,
    message_template: "Internal compiler error: {reason}",
    help_template: "This is a bug in calcc",
};

/// 所有错误码
pub static ERROR_CODES: &[ErrorCodeDefinition] = &[E0001, E0002, E0003, E1001, E1002, E1003, E9001];

impl ErrorCodeDefinition {
    /// 根据代码查找错误码定义
    pub fn find(code: &str) -> Option<&'static Self> {
        ERROR_CODES.iter().find(|c| c.code == code)
    }

    /// 获取所有错误码
    pub fn all() -> &'static [Self] {
        ERROR_CODES
    }

    /// 按类别获取错误码
    pub fn by_category(category: ErrorCategory) -> impl Iterator<Item = &'static Self> {
        ERROR_CODES.iter().filter(move |c| c.category == category)
    }

    /// 创建构建器
    pub fn builder(&self) -> DiagnosticBuilder {
        DiagnosticBuilder::new(self.code, self.message_template, self.help_template)
    }

    /// E0001 未知词法单元
    pub fn unknown_token(text: &str) -> DiagnosticBuilder {
        E0001.builder().param("text", text)
    }

    /// E0002 期望的词法单元不匹配
    pub fn expected_token(
        expected: &str,
        found: &str,
    ) -> DiagnosticBuilder {
        E0002
            .builder()
            .param("expected", expected)
            .param("found", found)
    }

    /// E0003 整数字面量越界
    pub fn integer_out_of_range(text: &str) -> DiagnosticBuilder {
        E0003.builder().param("text", text)
    }

    /// E1001 未声明的变量
    pub fn undeclared_variable(name: &str) -> DiagnosticBuilder {
        E1001.builder().param("name", name)
    }

    /// E1002 重复声明
    pub fn duplicate_declaration(name: &str) -> DiagnosticBuilder {
        E1002.builder().param("name", name)
    }

    /// E1003 非法指数
    pub fn invalid_exponent(
        reason: &str,
        max: Option<u32>,
    ) -> DiagnosticBuilder {
        let expected = match max {
            Some(max) => format!("an integer literal between 0 and {}", max),
            None => "a non-negative integer literal".to_string(),
        };
        E1003
            .builder()
            .param("reason", reason)
            .param("expected", expected)
    }

    /// E9001 内部错误
    pub fn internal_error(reason: &str) -> DiagnosticBuilder {
        E9001.builder().param("reason", reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::span::{Position, Span};

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = ErrorCodeDefinition::all().iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ERROR_CODES.len());
    }

    #[test]
    fn test_builder_renders_message_and_help() {
        let span = Span::new(Position::with_offset(2, 1, 7), Position::with_offset(2, 2, 8));
        let diag = ErrorCodeDefinition::undeclared_variable("y").at(span).build();
        assert_eq!(diag.code, "E1001");
        assert_eq!(diag.message, "Use of undeclared variable 'y'");
        assert_eq!(diag.help, "Declare it first, e.g. `int y;`");
        assert_eq!(diag.span, Some(span));
        assert!(diag.is_error());
    }

    #[test]
    fn test_find_and_category() {
        let def = ErrorCodeDefinition::find("E1003").map(|d| d.category);
        assert_eq!(def, Some(ErrorCategory::Semantic));
        assert!(ErrorCodeDefinition::find("E4242").is_none());
        assert_eq!(ErrorCodeDefinition::by_category(ErrorCategory::Parser).count(), 2);
    }
}
