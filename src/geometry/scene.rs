//! 场景聚合
//!
//! `Scene` 持有整个运行期间所有输入文件产出的网格、材质和模型绑定。
//! 它只会追加，不会收缩，也不会跨文件或按材质名去重。
//! 每个文件先构建为 `SceneBatch`，整个文件成功后才一次性追加进场景，
//! 所有位置都用下标表示，不持有跨越增长的引用。

use super::material::Material;
use super::mesh::Mesh;
use super::name::BoundedName;

/// 网格与材质的绑定
///
/// 与对应的网格在同一个 `usemtl` 边界上 1:1 创建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// 网格名称
    pub mesh_name: BoundedName,

    /// 材质名称
    pub material_name: BoundedName,
}

impl Model {
    pub fn new(mesh_name: BoundedName, material_name: BoundedName) -> Self {
        Self { mesh_name, material_name }
    }
}

/// 单个文件的暂存结果
#[derive(Debug, Clone, Default)]
pub struct SceneBatch {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub models: Vec<Model>,
}

/// 场景统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub meshes: usize,
    pub materials: usize,
    pub models: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// 整个运行的场景
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    models: Vec<Model>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    #[inline]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[inline]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// 追加一个文件的全部结果，已有条目的下标和内容保持不变
    pub fn append(&mut self, batch: SceneBatch) {
        self.meshes.extend(batch.meshes);
        self.materials.extend(batch.materials);
        self.models.extend(batch.models);
    }

    /// 按名称查找第一个匹配的材质
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// 材质不在场景中的模型绑定
    pub fn unbound_models(&self) -> Vec<&Model> {
        self.models
            .iter()
            .filter(|model| self.material(model.material_name.as_str()).is_none())
            .collect()
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            meshes: self.meshes.len(),
            materials: self.materials.len(),
            models: self.models.len(),
            vertices: self.meshes.iter().map(Mesh::vertex_count).sum(),
            triangles: self.meshes.iter().map(Mesh::triangle_count).sum(),
        }
    }
}
