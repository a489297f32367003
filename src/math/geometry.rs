//! 几何数学工具模块
//!
//! 提供切线空间计算（用于法线贴图）。
//! 这些函数用于后处理去重后的网格数据。

use crate::core::config::{DegenerateUvPolicy, TangentMode};
use crate::core::error::GeometryError;
use crate::geometry::vertex::Vertex;
use super::constants::EPSILON;
use super::utils::{vec2, vec3};
use super::Vector3;

/// 切线空间计算选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TangentOptions {
    pub mode: TangentMode,
    pub degenerate_uv: DegenerateUvPolicy,
}

impl Default for TangentOptions {
    fn default() -> Self {
        Self {
            mode: TangentMode::Overwrite,
            degenerate_uv: DegenerateUvPolicy::Propagate,
        }
    }
}

/// 单个三角形的切线基
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleBasis {
    pub tangent: Vector3,
    pub bitangent: Vector3,
    /// UV 差值矩阵的行列式
    pub determinant: f32,
}

/// 计算一个三角形的切线和副切线
///
/// # 算法
///
/// - 边向量: e1 = p1 - p0, e2 = p2 - p0
/// - UV 差值: d1 = uv1 - uv0, d2 = uv2 - uv0
/// - r = 1 / (d1.x * d2.y - d1.y * d2.x)
/// - tangent = r * (e1 * d2.y - e2 * d1.y)
/// - bitangent = r * (e2 * d1.x - e1 * d2.x)
///
/// 行列式为零时 r 为 ±∞，结果含 ±∞ / NaN，是否接受由调用方决定。
pub fn triangle_basis(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> TriangleBasis {
    let e1 = vec3(v1.position) - vec3(v0.position);
    let e2 = vec3(v2.position) - vec3(v0.position);
    let d1 = vec2(v1.texcoord) - vec2(v0.texcoord);
    let d2 = vec2(v2.texcoord) - vec2(v0.texcoord);

    let determinant = d1.x * d2.y - d1.y * d2.x;
    let r = 1.0 / determinant;

    TriangleBasis {
        tangent: (e1 * d2.y - e2 * d1.y) * r,
        bitangent: (e2 * d1.x - e1 * d2.x) * r,
        determinant,
    }
}

/// 计算切线空间
///
/// 每次处理 3 个索引。
///
/// - `TangentMode::Overwrite`: 三角形的三个顶点直接写入该三角形的切线基，
///   覆盖之前共享该顶点的三角形写入的值，不做累加或平均。
/// - `TangentMode::Accumulate`: 把切线基累加到顶点，最后对法线做
///   Gram-Schmidt 正交化并归一化。
///
/// `DegenerateUvPolicy::Reject` 时，|行列式| < EPSILON 的三角形返回
/// `GeometryError::DegenerateUv`；`Propagate` 时照常写入。
///
/// # 参数
///
/// - `mesh_name`: 用于错误信息
/// - `vertices`: 顶点数组（切线、副切线字段将被更新）
/// - `indices`: 索引数组（每3个索引定义一个三角形）
///
/// # 示例
///
/// ```rust
/// use scene_exporter::geometry::vertex::Vertex;
/// use scene_exporter::math::geometry::{compute_tangent_space, TangentOptions};
///
/// let mut vertices = vec![
///     Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
///     Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
///     Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
/// ];
///
/// compute_tangent_space("tri", &mut vertices, &[0, 1, 2], &TangentOptions::default()).unwrap();
/// assert_eq!(vertices[0].tangent, [1.0, 0.0, 0.0]);
/// ```
pub fn compute_tangent_space(
    mesh_name: &str,
    vertices: &mut [Vertex],
    indices: &[u32],
    options: &TangentOptions,
) -> Result<(), GeometryError> {
    if options.mode == TangentMode::Accumulate {
        for vertex in vertices.iter_mut() {
            vertex.tangent = [0.0; 3];
            vertex.bitangent = [0.0; 3];
        }
    }

    let mut degenerate = 0usize;

    for (triangle, corners) in indices.chunks_exact(3).enumerate() {
        let i0 = corners[0] as usize;
        let i1 = corners[1] as usize;
        let i2 = corners[2] as usize;

        for &i in &[i0, i1, i2] {
            if i >= vertices.len() {
                return Err(GeometryError::IndexOutOfRange {
                    attribute: "vertex",
                    index: i as u32,
                    count: vertices.len(),
                });
            }
        }

        let basis = triangle_basis(&vertices[i0], &vertices[i1], &vertices[i2]);

        if basis.determinant.abs() < EPSILON {
            if options.degenerate_uv == DegenerateUvPolicy::Reject {
                return Err(GeometryError::DegenerateUv {
                    mesh: mesh_name.to_string(),
                    triangle,
                    determinant: basis.determinant,
                });
            }
            degenerate += 1;
        }

        for &i in &[i0, i1, i2] {
            let vertex = &mut vertices[i];
            match options.mode {
                TangentMode::Overwrite => {
                    vertex.tangent = basis.tangent.into();
                    vertex.bitangent = basis.bitangent.into();
                }
                TangentMode::Accumulate => {
                    vertex.tangent = (vec3(vertex.tangent) + basis.tangent).into();
                    vertex.bitangent = (vec3(vertex.bitangent) + basis.bitangent).into();
                }
            }
        }
    }

    if degenerate > 0 {
        tracing::warn!(
            mesh = mesh_name,
            triangles = degenerate,
            "UV 映射退化，切线包含非有限值"
        );
    }

    if options.mode == TangentMode::Accumulate {
        // Gram-Schmidt 正交化并归一化
        for vertex in vertices.iter_mut() {
            let normal = vec3(vertex.normal);
            let tangent = vec3(vertex.tangent);
            let orthogonal = tangent - normal * normal.dot(&tangent);

            vertex.tangent = normalize(orthogonal).into();
            vertex.bitangent = normalize(vec3(vertex.bitangent)).into();
        }
    }

    Ok(())
}

/// 归一化，零长度向量返回零向量
#[inline]
fn normalize(v: Vector3) -> Vector3 {
    let length = v.norm();
    if length < EPSILON {
        Vector3::zeros()
    } else {
        v / length
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::approx_eq_vec3;

    fn identity_triangle() -> Vec<Vertex> {
        vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ]
    }

    #[test]
    fn test_identity_uv_mapping() {
        let mut vertices = identity_triangle();

        compute_tangent_space("tri", &mut vertices, &[0, 1, 2], &TangentOptions::default()).unwrap();

        for vertex in &vertices {
            assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(vertex.bitangent, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_scaled_uv_mapping() {
        let vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([2.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 4.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ];

        let basis = triangle_basis(&vertices[0], &vertices[1], &vertices[2]);

        assert!(approx_eq_vec3(&basis.tangent, &Vector3::new(2.0, 0.0, 0.0), EPSILON));
        assert!(approx_eq_vec3(&basis.bitangent, &Vector3::new(0.0, 4.0, 0.0), EPSILON));
        assert!((basis.determinant - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_overwrite_last_triangle_wins() {
        // 两个三角形共享顶点 0 和 2，第二个三角形的 U 方向被压缩一半
        let mut vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [-0.5, 0.0]),
        ];

        compute_tangent_space("pair", &mut vertices, &[0, 1, 2, 0, 2, 3], &TangentOptions::default())
            .unwrap();

        // 第一个三角形写入 (1,0,0)，第二个三角形用 (2,0,0) 覆盖顶点 0、2、3
        assert_eq!(vertices[1].tangent, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[0].tangent, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[2].tangent, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[3].tangent, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[0].bitangent, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_degenerate_uv_propagates_non_finite() {
        let mut vertices = identity_triangle();
        for vertex in vertices.iter_mut() {
            vertex.texcoord = [0.5, 0.5];
        }

        compute_tangent_space("flat", &mut vertices, &[0, 1, 2], &TangentOptions::default()).unwrap();

        assert!(vertices[0].tangent.iter().any(|c| !c.is_finite()));
    }

    #[test]
    fn test_degenerate_uv_rejected() {
        let mut vertices = identity_triangle();
        for vertex in vertices.iter_mut() {
            vertex.texcoord = [0.5, 0.5];
        }
        let options = TangentOptions {
            degenerate_uv: DegenerateUvPolicy::Reject,
            ..Default::default()
        };

        let result = compute_tangent_space("flat", &mut vertices, &[0, 1, 2], &options);

        assert!(matches!(
            result,
            Err(GeometryError::DegenerateUv { ref mesh, triangle: 0, .. }) if mesh == "flat"
        ));
    }

    #[test]
    fn test_accumulate_orthogonalizes_against_normal() {
        let mut vertices = identity_triangle();
        // 法线略微倾斜，累加模式应去掉切线在法线上的分量
        let tilted = Vector3::new(0.6, 0.0, 0.8);
        for vertex in vertices.iter_mut() {
            vertex.normal = tilted.into();
        }
        let options = TangentOptions {
            mode: TangentMode::Accumulate,
            ..Default::default()
        };

        compute_tangent_space("tilted", &mut vertices, &[0, 1, 2], &options).unwrap();

        for vertex in &vertices {
            let tangent = vec3(vertex.tangent);
            assert!((tangent.norm() - 1.0).abs() < 1e-5, "切线应该已归一化: {:?}", tangent);
            assert!(tangent.dot(&tilted).abs() < 1e-5, "切线应该与法线正交: {:?}", tangent);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let mut vertices = identity_triangle();

        let result = compute_tangent_space("tri", &mut vertices, &[0, 1, 7], &TangentOptions::default());

        assert!(matches!(result, Err(GeometryError::IndexOutOfRange { index: 7, .. })));
    }
}
