/// OBJ 场景文件加载器
///
/// 对同一块文本做三遍扫描：
///
/// 1. 计数：统计 `v` / `vt` / `vn` 和 `usemtl`，遇到 `mtllib` 立即加载材质库
/// 2. 填充：把 `v` / `vt` / `vn` 写入预分配的扁平数组，记录文件是否声明过 `vt`
/// 3. 分组：每个 `usemtl` 开启一个新分组，`f` 记录被拆成三角形放入当前分组
///
/// 是否带纹理是整个文件的属性而不是每个面的属性：
/// 在同一文件中混用 `p/t/n` 和 `p//n` 的面会以 `UnsupportedFace` 失败。
use std::path::{Path, PathBuf};

use super::line_scanner::LineScanner;
use super::mtl_loader::MtlLoader;
use super::record::Record;
use super::source::AssetSource;
use super::SceneLoader;
use crate::core::config::{MaterialSearch, ParserConfig};
use crate::core::error::{ParseError, Result};
use crate::geometry::dedup::{AttributeArrays, AttributeIndex, Triangle};
use crate::geometry::material::Material;
use crate::geometry::name::BoundedName;
use crate::math::{Vector2, Vector3};

/// 一个 `usemtl` 分组
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGroup {
    /// 相邻 `g` 行给出的网格名；没有时由场景按序号命名
    pub mesh_name: Option<BoundedName>,

    /// `usemtl` 引用的材质名
    pub material_name: BoundedName,

    /// 分组内的三角形，四边形已拆分
    pub triangles: Vec<Triangle>,
}

/// 单个 OBJ 文件的解析结果
#[derive(Debug, Clone, Default)]
pub struct ObjDocument {
    /// 扁平属性数组，解析完成后只读
    pub attributes: AttributeArrays,

    /// 按出现顺序排列的分组
    pub groups: Vec<FaceGroup>,

    /// 该文件通过 `mtllib` 引用的全部材质，按加载顺序排列
    pub materials: Vec<Material>,

    /// 文件是否声明过纹理坐标
    pub textured: bool,
}

/// 计数遍的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AttributeCounts {
    positions: usize,
    texcoords: usize,
    normals: usize,
    groups: usize,
}

/// OBJ 格式加载器
///
/// # 使用示例
///
/// ```rust
/// use scene_exporter::core::config::ParserConfig;
/// use scene_exporter::geometry::loaders::{MemorySource, ObjLoader, SceneLoader};
/// use std::path::Path;
///
/// let source = MemorySource::new();
/// let loader = ObjLoader::new(&source, ParserConfig::default());
/// let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nusemtl Red\nf 1//1 2//1 3//1\n";
/// let doc = loader.load_from_memory(obj, Path::new("tri.obj")).unwrap();
/// assert_eq!(doc.groups.len(), 1);
/// assert_eq!(doc.groups[0].triangles.len(), 1);
/// ```
pub struct ObjLoader<'a> {
    source: &'a dyn AssetSource,
    config: ParserConfig,
}

impl<'a> ObjLoader<'a> {
    pub fn new(source: &'a dyn AssetSource, config: ParserConfig) -> Self {
        Self { source, config }
    }

    /// 第一遍：计数并加载材质库
    fn count_pass(
        &self,
        scanner: &mut LineScanner<'_>,
        origin: &Path,
        materials: &mut Vec<Material>,
    ) -> Result<AttributeCounts> {
        let origin_str = origin.display().to_string();
        let mut counts = AttributeCounts::default();

        for record in scanner.by_ref().filter_map(Record::parse) {
            match record.directive {
                "v" => counts.positions += 1,
                "vt" => counts.texcoords += 1,
                "vn" => counts.normals += 1,
                "usemtl" => counts.groups += 1,
                "mtllib" => {
                    let library = self.resolve_library(record.single_token(&origin_str)?, origin);
                    let loader = MtlLoader::new(self.source, self.config.max_line_length);
                    materials.extend(loader.load_from_file(&library)?);
                }
                _ => {}
            }
        }

        Ok(counts)
    }

    /// 第二遍：填充属性数组
    fn fill_pass(
        &self,
        scanner: &mut LineScanner<'_>,
        origin: &str,
        counts: &AttributeCounts,
    ) -> std::result::Result<(AttributeArrays, bool), ParseError> {
        let mut attributes = AttributeArrays::with_capacity(counts.positions, counts.texcoords, counts.normals);
        let mut textured = false;

        for record in scanner.by_ref().filter_map(Record::parse) {
            match record.directive {
                "v" => attributes.positions.push(Vector3::from(record.floats::<3>(origin)?)),
                "vt" => {
                    attributes.texcoords.push(Vector2::from(record.floats::<2>(origin)?));
                    textured = true;
                }
                "vn" => attributes.normals.push(Vector3::from(record.floats::<3>(origin)?)),
                _ => {}
            }
        }

        Ok((attributes, textured))
    }

    /// 第三遍：按 `usemtl` 分组并拆分面
    fn group_pass(
        &self,
        scanner: &mut LineScanner<'_>,
        origin: &str,
        textured: bool,
        group_count: usize,
    ) -> std::result::Result<Vec<FaceGroup>, ParseError> {
        let mut groups: Vec<FaceGroup> = Vec::with_capacity(group_count);
        let mut previous: Option<Record<'_>> = None;

        while let Some(line) = scanner.next_line() {
            let record = match Record::parse(line) {
                Some(record) => record,
                None => continue,
            };

            match record.directive {
                "usemtl" => {
                    let material_name = record.single_token(origin)?;

                    // 先看前一条非空记录，再看紧随的下一行
                    let hint = match previous.as_ref().filter(|r| r.directive == "g") {
                        Some(g) => Some(g.single_token(origin)?),
                        None => match scanner.peek_line().and_then(Record::parse) {
                            Some(next) if next.directive == "g" => Some(next.single_token(origin)?),
                            _ => None,
                        },
                    };

                    groups.push(FaceGroup {
                        mesh_name: hint.map(BoundedName::new),
                        material_name: BoundedName::new(material_name),
                        triangles: Vec::new(),
                    });
                }
                "f" => {
                    let group = groups.last_mut().ok_or_else(|| ParseError::FaceOutsideGroup {
                        origin: origin.to_string(),
                        line: record.line,
                    })?;
                    let corners = parse_face(&record, textured, origin)?;

                    group.triangles.push(Triangle::new(corners[0], corners[1], corners[2]));
                    if corners.len() == 4 {
                        group.triangles.push(Triangle::new(corners[0], corners[2], corners[3]));
                    }
                }
                _ => {}
            }

            previous = Some(record);
        }

        Ok(groups)
    }

    /// 解析 `mtllib` 路径
    fn resolve_library(&self, token: &str, scene: &Path) -> PathBuf {
        match self.config.material_search {
            MaterialSearch::WorkingDirectory => PathBuf::from(token),
            MaterialSearch::SceneDirectory => scene
                .parent()
                .map(|dir| dir.join(token))
                .unwrap_or_else(|| PathBuf::from(token)),
        }
    }
}

/// 解析一条 `f` 记录的 3 或 4 个角点
fn parse_face(record: &Record<'_>, textured: bool, origin: &str) -> std::result::Result<Vec<AttributeIndex>, ParseError> {
    let unsupported = |reason: String| ParseError::UnsupportedFace {
        origin: origin.to_string(),
        line: record.line,
        reason,
    };

    if record.args.len() != 3 && record.args.len() != 4 {
        return Err(unsupported(format!("{} corners, expected 3 or 4", record.args.len())));
    }

    record
        .args
        .iter()
        .map(|token| {
            parse_corner(token, textured).ok_or_else(|| {
                let grammar = if textured { "p/t/n" } else { "p//n" };
                unsupported(format!("corner '{}' does not match '{}'", token, grammar))
            })
        })
        .collect()
}

/// 解析单个角点；带纹理的文件要求 `p/t/n`，否则要求 `p//n` 且 `t` 记为 0
fn parse_corner(token: &str, textured: bool) -> Option<AttributeIndex> {
    let mut parts = token.split('/');
    let p = parse_index(parts.next()?)?;
    let t = parts.next()?;
    let n = parse_index(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let t = match (textured, t.is_empty()) {
        (true, false) => t.parse().ok()?,
        (false, true) => 0,
        _ => return None,
    };

    Some(AttributeIndex::new(p, t, n))
}

/// 位置和法线索引必须从 1 开始
fn parse_index(token: &str) -> Option<u32> {
    token.parse().ok().filter(|&index| index >= 1)
}

impl SceneLoader for ObjLoader<'_> {
    type Output = ObjDocument;

    fn load_from_file(&self, path: &Path) -> Result<Self::Output> {
        let data = self.source.read(path)?;
        self.load_from_memory(&data, path)
    }

    fn load_from_memory(&self, data: &[u8], origin: &Path) -> Result<Self::Output> {
        let text = String::from_utf8_lossy(data);
        let origin_str = origin.display().to_string();
        let mut scanner = LineScanner::new(&text, self.config.max_line_length);

        let mut materials = Vec::new();
        let counts = self.count_pass(&mut scanner, origin, &mut materials)?;

        scanner.rewind();
        let (attributes, textured) = self.fill_pass(&mut scanner, &origin_str, &counts)?;

        scanner.rewind();
        let groups = self.group_pass(&mut scanner, &origin_str, textured, counts.groups)?;

        tracing::debug!(
            origin = %origin_str,
            positions = attributes.positions.len(),
            texcoords = attributes.texcoords.len(),
            normals = attributes.normals.len(),
            groups = groups.len(),
            materials = materials.len(),
            textured,
            truncated_lines = scanner.truncated_lines(),
            "OBJ 文件解析完成"
        );

        Ok(ObjDocument {
            attributes,
            groups,
            materials,
            textured,
        })
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}
