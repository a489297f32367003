//! 导出流程
//!
//! 按给定顺序逐个处理输入文件，全部结果追加到同一个场景：
//!
//! ```text
//! ObjLoader（内部加载 mtllib）
//!     ↓ 每个 usemtl 分组
//! deduplicate → compute_tangent_space → Mesh + Model
//!     ↓ 整个文件成功后
//! Scene::append
//! ```
//!
//! 单线程顺序执行。任何错误都会中止整个运行；失败文件的任何部分都不会进入场景。

use std::path::{Path, PathBuf};

use crate::core::config::{Config, ParserConfig};
use crate::core::error::Result;
use crate::geometry::dedup::{deduplicate, AttributeArrays, DedupOutput, Triangle};
use crate::geometry::loaders::{has_supported_extension, AssetSource, ObjDocument, ObjLoader, SceneLoader};
use crate::geometry::{BoundedName, Mesh, Model, Scene, SceneBatch, SceneStats};
use crate::math::geometry::{compute_tangent_space, TangentOptions};
use crate::{export_info, export_warn};

/// 单个文件的导出统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub origin: PathBuf,
    pub meshes: usize,
    pub materials: usize,
    pub models: usize,
    pub textured: bool,
}

/// 场景导出器
///
/// 持有整个运行期间的 `Scene`。
///
/// # 使用示例
///
/// ```rust
/// use scene_exporter::core::Config;
/// use scene_exporter::exporter::Exporter;
/// use scene_exporter::geometry::loaders::MemorySource;
///
/// let source = MemorySource::new().with_file(
///     "tri.obj",
///     "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nusemtl Red\nf 1//1 2//1 3//1\n",
/// );
/// let mut exporter = Exporter::new(source, &Config::default());
/// exporter.run(["tri.obj"]).unwrap();
///
/// assert_eq!(exporter.scene().meshes()[0].name, "mesh0");
/// ```
pub struct Exporter<S: AssetSource> {
    source: S,
    parser: ParserConfig,
    tangent: TangentOptions,
    scene: Scene,
}

impl<S: AssetSource> Exporter<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            parser: config.parser.clone(),
            tangent: TangentOptions {
                mode: config.tangent.mode,
                degenerate_uv: config.tangent.degenerate_uv,
            },
            scene: Scene::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// 按顺序处理所有文件，遇到第一个错误即返回
    pub fn run<I, P>(&mut self, paths: I) -> Result<SceneStats>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.process_file(path.as_ref())?;
        }

        for model in self.scene.unbound_models() {
            export_warn!(
                mesh = %model.mesh_name,
                material = %model.material_name,
                "模型引用的材质不在场景中"
            );
        }

        Ok(self.scene.stats())
    }

    /// 处理一个场景文件，成功后把结果追加到场景
    pub fn process_file(&mut self, path: &Path) -> Result<FileSummary> {
        let _span = tracing::info_span!("export_file", origin = %path.display()).entered();

        if !has_supported_extension::<ObjLoader>(path) {
            export_warn!(origin = %path.display(), "扩展名不是 .obj，仍按 OBJ 解析");
        }

        let document = ObjLoader::new(&self.source, self.parser.clone()).load_from_file(path)?;
        let textured = document.textured;
        let batch = self.build_batch(document)?;

        let summary = FileSummary {
            origin: path.to_path_buf(),
            meshes: batch.meshes.len(),
            materials: batch.materials.len(),
            models: batch.models.len(),
            textured,
        };
        self.scene.append(batch);

        export_info!(
            origin = %path.display(),
            meshes = summary.meshes,
            materials = summary.materials,
            textured,
            "文件导出完成"
        );
        Ok(summary)
    }

    /// 把解析结果转换为暂存批次；未命名网格按整个运行中的序号命名
    fn build_batch(&self, document: ObjDocument) -> Result<SceneBatch> {
        let base = self.scene.mesh_count();
        let mut batch = SceneBatch {
            meshes: Vec::with_capacity(document.groups.len()),
            materials: document.materials,
            models: Vec::with_capacity(document.groups.len()),
        };

        for (ordinal, group) in document.groups.into_iter().enumerate() {
            let name = group
                .mesh_name
                .unwrap_or_else(|| BoundedName::new(&format!("mesh{}", base + ordinal)));

            let mesh = build_mesh(name.clone(), &group.triangles, &document.attributes, &self.tangent)?;
            batch.models.push(Model::new(name, group.material_name));
            batch.meshes.push(mesh);
        }

        Ok(batch)
    }
}

/// 对一个分组去重并计算切线空间
pub fn build_mesh(
    name: BoundedName,
    triangles: &[Triangle],
    attributes: &AttributeArrays,
    options: &TangentOptions,
) -> Result<Mesh> {
    let DedupOutput { mut vertices, indices } = deduplicate(triangles, attributes)?;
    compute_tangent_space(name.as_str(), &mut vertices, &indices, options)?;

    let mesh = Mesh { name, vertices, indices };
    mesh.validate()?;

    tracing::debug!(
        mesh = %mesh.name,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "网格构建完成"
    );
    Ok(mesh)
}
