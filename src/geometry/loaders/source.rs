//! 文件读取
//!
//! 场景文件和它引用的材质库都通过 `AssetSource` 读取，
//! 整个文件在解析开始前被同步读入内存。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::error::{ExporterError, Result};

/// 整文件读取接口
pub trait AssetSource {
    /// 读取整个文件
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// 从文件系统读取
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSource;

impl AssetSource for FileSystemSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| ExporterError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// 内存中的文件表
///
/// 用于测试和嵌入式调用，路径按字面匹配。
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加文件，返回自身以便链式调用
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ExporterError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_roundtrip() {
        let source = MemorySource::new().with_file("a.obj", "v 0 0 0\n");

        assert_eq!(source.read(Path::new("a.obj")).unwrap(), b"v 0 0 0\n".to_vec());
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let result = MemorySource::new().read(Path::new("missing.mtl"));
        assert!(matches!(result, Err(ExporterError::FileRead { ref path, .. }) if path == Path::new("missing.mtl")));

        let result = FileSystemSource.read(Path::new("definitely/not/here.obj"));
        assert!(matches!(result, Err(ExporterError::FileRead { .. })));
    }
}
