//! 编译配置
//!
//! 管理编译器配置选项：错误恢复策略、指数上限、模块名和日志开关。

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置加载错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 错误恢复策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorRecoveryStrategy {
    /// 遇到第一个错误后丢弃剩余输入，只报告一个错误
    #[default]
    Panic,
    /// 跳到下一个 `;` 或 `end` 之后继续解析，收集所有错误
    SkipStatement,
}

impl std::fmt::Display for ErrorRecoveryStrategy {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorRecoveryStrategy::Panic => write!(f, "panic"),
            ErrorRecoveryStrategy::SkipStatement => write!(f, "skip_statement"),
        }
    }
}

fn default_module_name() -> String {
    "main".to_string()
}

/// 编译配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// 错误恢复策略
    #[serde(default)]
    pub error_recovery: ErrorRecoveryStrategy,

    /// `^` 右操作数允许的最大值，`None` 表示不设上限
    #[serde(default)]
    pub max_exponent: Option<u32>,

    /// 生成的 IR 模块名
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// 是否启用详细日志
    #[serde(default)]
    pub verbose: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            error_recovery: ErrorRecoveryStrategy::default(),
            max_exponent: None,
            module_name: default_module_name(),
            verbose: false,
        }
    }
}

impl CompileConfig {
    /// 创建默认配置
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// 设置错误恢复策略
    #[inline]
    pub fn with_error_recovery(
        mut self,
        strategy: ErrorRecoveryStrategy,
    ) -> Self {
        self.error_recovery = strategy;
        self
    }

    /// 设置指数上限
    #[inline]
    pub fn with_max_exponent(
        mut self,
        max: u32,
    ) -> Self {
        self.max_exponent = Some(max);
        self
    }

    /// 设置模块名
    #[inline]
    pub fn with_module_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.module_name = name.into();
        self
    }

    /// 启用详细日志
    #[inline]
    pub fn verbose(
        mut self,
        verbose: bool,
    ) -> Self {
        self.verbose = verbose;
        self
    }
}
