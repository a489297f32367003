/// 顶点去重模块
///
/// 把一个分组中任意的 (位置, UV, 法线) 索引三元组压缩为紧凑的顶点缓冲区
/// 和三角形索引缓冲区。同一分组内相同的三元组总是映射到同一个输出顶点。

use std::collections::BTreeMap;

use super::vertex::Vertex;
use crate::core::error::GeometryError;
use crate::math::{Vector2, Vector3};

/// 未提供 UV 时使用的默认纹理坐标
pub const DEFAULT_TEXCOORD: [f32; 2] = [0.5, 0.5];

/// 属性索引三元组
///
/// 从 1 开始的索引；`t == 0` 表示文件没有声明任何纹理坐标，使用默认 UV。
/// 派生的全序先比较位置，再比较 UV，最后比较法线，作为去重映射的键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeIndex {
    pub p: u32,
    pub t: u32,
    pub n: u32,
}

impl AttributeIndex {
    #[inline]
    pub fn new(p: u32, t: u32, n: u32) -> Self {
        Self { p, t, n }
    }
}

/// 三角形，恰好三个角点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub corners: [AttributeIndex; 3],
}

impl Triangle {
    #[inline]
    pub fn new(a: AttributeIndex, b: AttributeIndex, c: AttributeIndex) -> Self {
        Self { corners: [a, b, c] }
    }
}

/// 整个文件的扁平属性数组
///
/// 第二遍扫描结束后只读，被所有分组共享。
#[derive(Debug, Clone, Default)]
pub struct AttributeArrays {
    pub positions: Vec<Vector3>,
    pub texcoords: Vec<Vector2>,
    pub normals: Vec<Vector3>,
}

impl AttributeArrays {
    /// 按计数预分配容量
    pub fn with_capacity(positions: usize, texcoords: usize, normals: usize) -> Self {
        Self {
            positions: Vec::with_capacity(positions),
            texcoords: Vec::with_capacity(texcoords),
            normals: Vec::with_capacity(normals),
        }
    }

    /// 根据属性三元组构建顶点，UV 的 V 分量翻转为 `1 - v`
    pub fn vertex(&self, index: AttributeIndex) -> Result<Vertex, GeometryError> {
        let position = fetch(&self.positions, index.p, "position")?;
        let normal = fetch(&self.normals, index.n, "normal")?;
        let texcoord = if index.t == 0 {
            DEFAULT_TEXCOORD
        } else {
            let uv = fetch(&self.texcoords, index.t, "texcoord")?;
            [uv.x, uv.y]
        };

        Ok(Vertex::new(
            [position.x, position.y, position.z],
            [normal.x, normal.y, normal.z],
            [texcoord[0], 1.0 - texcoord[1]],
        ))
    }
}

/// 按 1 起始的索引读取属性
fn fetch<T: Copy>(values: &[T], index: u32, attribute: &'static str) -> Result<T, GeometryError> {
    index
        .checked_sub(1)
        .and_then(|i| values.get(i as usize))
        .copied()
        .ok_or(GeometryError::IndexOutOfRange {
            attribute,
            index,
            count: values.len(),
        })
}

/// 去重结果
#[derive(Debug, Clone, Default)]
pub struct DedupOutput {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// 对一个分组的三角形列表去重
///
/// 有序映射以属性三元组为键、输出槽位为值。
/// 新三元组按首次出现顺序追加到顶点缓冲区；无论是否新建，都把槽位写入索引缓冲区。
/// 复杂度 O(n log n)，n 为角点数。
pub fn deduplicate(triangles: &[Triangle], attributes: &AttributeArrays) -> Result<DedupOutput, GeometryError> {
    let mut slots: BTreeMap<AttributeIndex, u32> = BTreeMap::new();
    let mut output = DedupOutput {
        vertices: Vec::new(),
        indices: Vec::with_capacity(triangles.len() * 3),
    };

    for corner in triangles.iter().flat_map(|t| t.corners.iter().copied()) {
        let slot = match slots.get(&corner) {
            Some(&slot) => slot,
            None => {
                let slot = output.vertices.len() as u32;
                output.vertices.push(attributes.vertex(corner)?);
                slots.insert(corner, slot);
                slot
            }
        };
        output.indices.push(slot);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_attributes() -> AttributeArrays {
        AttributeArrays {
            positions: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            texcoords: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 0.25),
            ],
            normals: vec![Vector3::new(0.0, 0.0, 1.0)],
        }
    }

    fn corner(i: u32) -> AttributeIndex {
        AttributeIndex::new(i, i, 1)
    }

    #[test]
    fn test_attribute_index_ordering() {
        let a = AttributeIndex::new(1, 5, 9);
        let b = AttributeIndex::new(2, 0, 0);
        let c = AttributeIndex::new(1, 5, 10);
        let d = AttributeIndex::new(1, 6, 0);

        assert!(a < b);
        assert!(a < c);
        assert!(c < d);
    }

    #[test]
    fn test_shared_corners_collapse() {
        let triangles = vec![
            Triangle::new(corner(1), corner(2), corner(3)),
            Triangle::new(corner(1), corner(3), corner(4)),
        ];

        let out = deduplicate(&triangles, &quad_attributes()).unwrap();

        assert_eq!(out.vertices.len(), 4);
        assert_eq!(out.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_indices_reconstruct_original_corners() {
        let attributes = quad_attributes();
        let triangles = vec![
            Triangle::new(corner(3), corner(1), corner(2)),
            Triangle::new(corner(2), corner(4), corner(3)),
            Triangle::new(corner(4), corner(1), corner(3)),
        ];

        let out = deduplicate(&triangles, &attributes).unwrap();

        let corners: Vec<AttributeIndex> = triangles.iter().flat_map(|t| t.corners).collect();
        for (slot, original) in out.indices.iter().zip(corners) {
            let expected = attributes.vertex(original).unwrap();
            assert_eq!(out.vertices[*slot as usize], expected);
        }
    }

    #[test]
    fn test_texcoord_v_is_flipped_once() {
        let out = deduplicate(
            &[Triangle::new(corner(1), corner(2), corner(4))],
            &quad_attributes(),
        )
        .unwrap();

        assert_eq!(out.vertices[0].texcoord, [0.0, 1.0]);
        assert_eq!(out.vertices[1].texcoord, [1.0, 1.0]);
        assert_eq!(out.vertices[2].texcoord, [0.0, 0.75]);
    }

    #[test]
    fn test_missing_texcoord_uses_default() {
        let triangles = vec![Triangle::new(
            AttributeIndex::new(1, 0, 1),
            AttributeIndex::new(2, 0, 1),
            AttributeIndex::new(3, 0, 1),
        )];

        let out = deduplicate(&triangles, &quad_attributes()).unwrap();

        for vertex in &out.vertices {
            assert_eq!(vertex.texcoord, [0.5, 0.5]);
        }
    }

    #[test]
    fn test_distinct_normals_are_distinct_vertices() {
        let mut attributes = quad_attributes();
        attributes.normals.push(Vector3::new(0.0, 1.0, 0.0));
        let triangles = vec![
            Triangle::new(corner(1), corner(2), corner(3)),
            Triangle::new(AttributeIndex::new(1, 1, 2), corner(3), corner(4)),
        ];

        let out = deduplicate(&triangles, &attributes).unwrap();

        assert_eq!(out.vertices.len(), 5);
        assert_eq!(out.indices, vec![0, 1, 2, 3, 2, 4]);
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let triangles = vec![Triangle::new(corner(1), corner(2), AttributeIndex::new(9, 1, 1))];

        let result = deduplicate(&triangles, &quad_attributes());

        assert_eq!(
            result.unwrap_err(),
            GeometryError::IndexOutOfRange { attribute: "position", index: 9, count: 4 }
        );
    }
}
