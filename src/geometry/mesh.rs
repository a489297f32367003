/// 网格数据结构模块
///
/// 定义一个 `usemtl` 分组最终产出的网格：去重后的顶点缓冲区和三角形索引缓冲区。

use super::name::BoundedName;
use super::vertex::Vertex;
use crate::core::error::GeometryError;

/// 导出网格
///
/// 在解析阶段跨过一个新的 `usemtl` 分组边界时产生，
/// 去重与切线空间计算完成后才被追加到场景中。
///
/// # 示例
///
/// ```rust
/// use scene_exporter::geometry::mesh::Mesh;
/// use scene_exporter::geometry::vertex::Vertex;
///
/// let mesh = Mesh {
///     name: "Triangle".into(),
///     vertices: vec![
///         Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
///         Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
///         Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
///     ],
///     indices: vec![0, 1, 2],
/// };
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// 网格名称
    pub name: BoundedName,

    /// 顶点数组，每个唯一属性三元组一个顶点，按首次出现顺序排列
    pub vertices: Vec<Vertex>,

    /// 三角形索引，每3个索引定义一个三角形
    pub indices: Vec<u32>,
}

impl Mesh {
    /// 创建一个指定名称的空网格
    pub fn with_name(name: impl Into<BoundedName>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 顶点缓冲区的字节视图，供二进制写出器使用
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 索引缓冲区的字节视图
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数（每个三角形3个顶点）
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::Validation(format!(
                "mesh '{}': index count {} is not a multiple of 3",
                self.name,
                self.indices.len()
            )));
        }

        let vertex_count = self.vertices.len();
        for (i, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(GeometryError::Validation(format!(
                    "mesh '{}': index {} at position {} exceeds vertex count {}",
                    self.name, index, i, vertex_count
                )));
            }
        }

        Ok(())
    }
}
