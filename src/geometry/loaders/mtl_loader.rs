/// MTL 材质库加载器
///
/// 识别的指令：`newmtl`、`map_Kd`、`map_bump`（及别名 `map_Bump`、`bump`）、`Ks`、`Ns`。
/// 其他指令被忽略。
use std::path::Path;

use super::line_scanner::LineScanner;
use super::record::Record;
use super::source::AssetSource;
use super::SceneLoader;
use crate::core::error::{ParseError, Result};
use crate::geometry::material::Material;
use crate::math::Vector3;

/// MTL 格式加载器
///
/// 每个 `newmtl` 产出一个 `Material`，按文件中的顺序返回；
/// 调用方负责把它们追加到场景的材质表末尾，先前文件的材质保持不变。
///
/// # 使用示例
///
/// ```rust
/// use scene_exporter::geometry::loaders::{MemorySource, MtlLoader, SceneLoader};
/// use std::path::Path;
///
/// let source = MemorySource::new();
/// let loader = MtlLoader::new(&source, 1024);
/// let materials = loader
///     .load_from_memory(b"newmtl Steel\nNs 32\n", Path::new("steel.mtl"))
///     .unwrap();
/// assert_eq!(materials[0].specular_coefficient, 32.0);
/// ```
pub struct MtlLoader<'a> {
    source: &'a dyn AssetSource,
    max_line_length: usize,
}

impl<'a> MtlLoader<'a> {
    pub fn new(source: &'a dyn AssetSource, max_line_length: usize) -> Self {
        Self { source, max_line_length }
    }

    fn parse(&self, text: &str, origin: &str) -> std::result::Result<Vec<Material>, ParseError> {
        let mut scanner = LineScanner::new(text, self.max_line_length);

        // 先计数，一次分配
        let count = scanner
            .by_ref()
            .filter_map(Record::parse)
            .filter(|record| record.directive == "newmtl")
            .count();
        scanner.rewind();

        let mut materials: Vec<Material> = Vec::with_capacity(count);
        for record in scanner.filter_map(Record::parse) {
            match record.directive {
                "newmtl" => materials.push(Material::new(record.single_token(origin)?)),
                "map_Kd" | "map_bump" | "map_Bump" | "bump" | "Ks" | "Ns" => {
                    match materials.last_mut() {
                        Some(current) => apply_directive(current, &record, origin)?,
                        None => tracing::warn!(
                            origin,
                            line = record.line,
                            directive = record.directive,
                            "材质指令出现在 newmtl 之前，已忽略"
                        ),
                    }
                }
                _ => {}
            }
        }

        Ok(materials)
    }
}

/// 把一条材质指令应用到当前材质
fn apply_directive(material: &mut Material, record: &Record<'_>, origin: &str) -> std::result::Result<(), ParseError> {
    match record.directive {
        "map_Kd" => material.albedo_tex = record.single_token(origin)?.into(),
        "map_bump" | "map_Bump" | "bump" => {
            // 只取第一次出现
            if !material.has_normal_tex() {
                material.normal_tex = record.single_token(origin)?.into();
            }
        }
        "Ks" => {
            let [r, g, b] = record.floats::<3>(origin)?;
            material.specular_color = Vector3::new(r, g, b);
        }
        "Ns" => {
            let [coefficient] = record.floats::<1>(origin)?;
            material.specular_coefficient = coefficient;
        }
        _ => {}
    }
    Ok(())
}

impl SceneLoader for MtlLoader<'_> {
    type Output = Vec<Material>;

    fn load_from_file(&self, path: &Path) -> Result<Self::Output> {
        let data = self.source.read(path)?;
        self.load_from_memory(&data, path)
    }

    fn load_from_memory(&self, data: &[u8], origin: &Path) -> Result<Self::Output> {
        let text = String::from_utf8_lossy(data);
        let origin = origin.display().to_string();

        let materials = self.parse(&text, &origin)?;

        tracing::debug!(origin = %origin, materials = materials.len(), "材质库加载完成");
        Ok(materials)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["mtl"]
    }
}
