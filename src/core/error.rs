//! 错误处理模块
//!
//! 定义了导出器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息（文件、行号、指令）
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//!
//! 所有错误在检测点都是不可恢复的：批处理工具的失败模型是整体失败，
//! 由使用者修正输入后重新运行。

use std::fmt;
use std::path::PathBuf;

/// 导出器统一的 Result 类型
pub type Result<T> = std::result::Result<T, ExporterError>;

/// 导出器的错误类型
#[derive(Debug)]
pub enum ExporterError {
    /// 配置错误
    Config(ConfigError),

    /// 文本解析错误（OBJ / MTL）
    Parse(ParseError),

    /// 几何处理错误（去重、切线空间）
    Geometry(GeometryError),

    /// 源文件缺失或不可读
    FileRead { path: PathBuf, source: std::io::Error },

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 文本解析相关的错误
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 指令参数数量或类型不符合预期
    Format {
        origin: String,
        line: usize,
        directive: String,
        reason: String,
    },

    /// 面记录的角点数不是 3 或 4，或者角点语法与纹理模式不匹配
    UnsupportedFace {
        origin: String,
        line: usize,
        reason: String,
    },

    /// 在第一个 `usemtl` 之前出现了面记录
    FaceOutsideGroup { origin: String, line: usize },
}

/// 几何处理相关的错误
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// 三角形 UV 行列式接近零
    DegenerateUv {
        mesh: String,
        triangle: usize,
        determinant: f32,
    },

    /// 面记录引用了不存在的属性
    IndexOutOfRange {
        attribute: &'static str,
        index: u32,
        count: usize,
    },

    /// 网格数据验证失败
    Validation(String),
}

impl fmt::Display for ExporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExporterError::Config(e) => write!(f, "Configuration error: {}", e),
            ExporterError::Parse(e) => write!(f, "Parse error: {}", e),
            ExporterError::Geometry(e) => write!(f, "Geometry error: {}", e),
            ExporterError::FileRead { path, source } => {
                write!(f, "Cannot read '{}': {}", path.display(), source)
            }
            ExporterError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Format { origin, line, directive, reason } => {
                write!(f, "{}:{}: malformed '{}' record: {}", origin, line, directive, reason)
            }
            ParseError::UnsupportedFace { origin, line, reason } => {
                write!(f, "{}:{}: can't load this OBJ, unsupported face: {}", origin, line, reason)
            }
            ParseError::FaceOutsideGroup { origin, line } => {
                write!(f, "{}:{}: face record before any 'usemtl' group", origin, line)
            }
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateUv { mesh, triangle, determinant } => write!(
                f,
                "Degenerate UV mapping in mesh '{}' triangle {} (determinant {})",
                mesh, triangle, determinant
            ),
            GeometryError::IndexOutOfRange { attribute, index, count } => write!(
                f,
                "{} index {} out of range (1-{})",
                attribute, index, count
            ),
            GeometryError::Validation(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ExporterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExporterError::FileRead { source, .. } => Some(source),
            ExporterError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ParseError {}
impl std::error::Error for GeometryError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err)
    }
}

impl From<ConfigError> for ExporterError {
    fn from(err: ConfigError) -> Self {
        ExporterError::Config(err)
    }
}

impl From<ParseError> for ExporterError {
    fn from(err: ParseError) -> Self {
        ExporterError::Parse(err)
    }
}

impl From<GeometryError> for ExporterError {
    fn from(err: GeometryError) -> Self {
        ExporterError::Geometry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display_names_location() {
        let err: ExporterError = ParseError::Format {
            origin: "cube.obj".to_string(),
            line: 7,
            directive: "vn".to_string(),
            reason: "expected 3 arguments, found 2".to_string(),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("cube.obj:7"));
        assert!(msg.contains("'vn'"));
    }

    #[test]
    fn test_file_read_error_has_source() {
        let err = ExporterError::FileRead {
            path: PathBuf::from("missing.obj"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };

        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.obj"));
    }

    #[test]
    fn test_geometry_error_conversion() {
        let err: ExporterError = GeometryError::IndexOutOfRange {
            attribute: "position",
            index: 9,
            count: 8,
        }
        .into();

        assert!(matches!(err, ExporterError::Geometry(GeometryError::IndexOutOfRange { .. })));
        assert!(err.to_string().contains("position index 9"));
    }
}
