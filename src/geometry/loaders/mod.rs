/// 场景文本加载器模块
///
/// 提供统一的加载接口和 OBJ / MTL 两种格式的实现。
///
/// # 支持的格式
///
/// - **OBJ**: 场景几何（位置、法线、UV、按 `usemtl` 分组的面）
/// - **MTL**: 材质库（`newmtl`、`map_Kd`、`map_bump`、`Ks`、`Ns`）
///
/// # 使用示例
///
/// ```rust,no_run
/// use scene_exporter::core::config::ParserConfig;
/// use scene_exporter::geometry::loaders::{FileSystemSource, ObjLoader, SceneLoader};
/// use std::path::Path;
///
/// let source = FileSystemSource;
/// let doc = ObjLoader::new(&source, ParserConfig::default())
///     .load_from_file(Path::new("model.obj"))?;
/// println!("分组数: {}", doc.groups.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::Result;
use std::path::Path;

pub mod line_scanner;
pub mod record;
pub mod source;
pub mod mtl_loader;
pub mod obj_loader;

// 重新导出加载器
pub use line_scanner::{Line, LineScanner, DEFAULT_MAX_LINE_LENGTH};
pub use mtl_loader::MtlLoader;
pub use obj_loader::{FaceGroup, ObjDocument, ObjLoader};
pub use source::{AssetSource, FileSystemSource, MemorySource};

/// 场景文本加载器 trait
///
/// 所有格式的加载器都实现此 trait。
/// 文件内容经 `AssetSource` 一次性读入后只做扫描，不被修改。
pub trait SceneLoader {
    /// 加载结果
    type Output;

    /// 从文件路径加载
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取（`ExporterError::FileRead`）
    /// - 记录格式错误（`ExporterError::Parse`）
    fn load_from_file(&self, path: &Path) -> Result<Self::Output>;

    /// 从内存数据加载
    ///
    /// `origin` 用于错误信息和相对路径解析。
    fn load_from_memory(&self, data: &[u8], origin: &Path) -> Result<Self::Output>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 路径扩展名是否被加载器 `L` 支持
pub fn has_supported_extension<L: SceneLoader>(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .map_or(false, |e| L::supported_extensions().contains(&e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check() {
        assert!(has_supported_extension::<ObjLoader>(Path::new("ship.OBJ")));
        assert!(has_supported_extension::<MtlLoader>(Path::new("dir/ship.mtl")));
        assert!(!has_supported_extension::<ObjLoader>(Path::new("ship.fbx")));
        assert!(!has_supported_extension::<ObjLoader>(Path::new("ship")));
    }
}
