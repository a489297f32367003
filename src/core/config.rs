//! 配置管理模块
//!
//! 提供导出器配置的加载、解析和管理功能。
//! 从 TOML 配置文件加载；文件不存在时使用默认值。命令行本身不接受任何开关。
//!
//! # 配置文件格式 (exporter.toml)
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//!
//! [parser]
//! max_line_length = 1024
//! material_search = "working_directory"  # 或 "scene_directory"
//!
//! [tangent]
//! mode = "overwrite"          # 或 "accumulate"
//! degenerate_uv = "propagate" # 或 "reject"
//! ```

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use super::error::{ConfigError, ExporterError, Result};
use crate::geometry::loaders::DEFAULT_MAX_LINE_LENGTH;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "exporter.toml";

/// 行长度下限，低于此值连最短的面记录都放不下
const MIN_LINE_LENGTH: usize = 16;

/// 导出器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 文本解析配置
    #[serde(default)]
    pub parser: ParserConfig,

    /// 切线空间配置
    #[serde(default)]
    pub tangent: TangentConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// 文本解析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// 单行最大字节数，超出部分被截断
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// `mtllib` 路径的解析基准
    #[serde(default = "default_material_search")]
    pub material_search: MaterialSearch,
}

/// `mtllib` 相对路径的解析方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSearch {
    /// 相对于进程工作目录
    WorkingDirectory,
    /// 相对于场景文件所在目录
    SceneDirectory,
}

/// 切线空间配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TangentConfig {
    /// 共享顶点的写入策略
    #[serde(default = "default_tangent_mode")]
    pub mode: TangentMode,

    /// UV 行列式接近零时的处理策略
    #[serde(default = "default_degenerate_uv")]
    pub degenerate_uv: DegenerateUvPolicy,
}

/// 共享顶点的切线写入策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TangentMode {
    /// 后处理的三角形覆盖先前写入的值，不做平均
    Overwrite,
    /// 累加后对法线做 Gram-Schmidt 正交化并归一化（会改变输出）
    Accumulate,
}

/// 退化 UV 的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateUvPolicy {
    /// 允许 ±∞ / NaN 写入切线
    Propagate,
    /// 以 `GeometryError::DegenerateUv` 失败
    Reject,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "scene_exporter.log".to_string() }
fn default_max_line_length() -> usize { DEFAULT_MAX_LINE_LENGTH }
fn default_material_search() -> MaterialSearch { MaterialSearch::WorkingDirectory }
fn default_tangent_mode() -> TangentMode { TangentMode::Overwrite }
fn default_degenerate_uv() -> DegenerateUvPolicy { DegenerateUvPolicy::Propagate }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            material_search: default_material_search(),
        }
    }
}

impl Default for TangentConfig {
    fn default() -> Self {
        Self {
            mode: default_tangent_mode(),
            degenerate_uv: default_degenerate_uv(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()).into(),
            _ => ExporterError::from(e),
        })?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载；仅当文件不存在时使用默认配置
    ///
    /// 文件存在但无法读取或解析时返回错误，不会静默回退。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_file(path) {
            Err(ExporterError::Config(ConfigError::FileNotFound(_))) => Ok(Self::default()),
            other => other,
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.parser.max_line_length < MIN_LINE_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "parser.max_line_length".to_string(),
                reason: format!("Line length cap must be at least {} bytes", MIN_LINE_LENGTH),
            }.into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "File output requires a log file path".to_string(),
            }.into());
        }

        Ok(())
    }
}
