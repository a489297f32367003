/// 几何体顶点定义模块
///
/// 定义导出用的紧凑顶点结构，包含位置、法线、切线、副切线和UV坐标。

use bytemuck::{Pod, Zeroable};

/// 导出顶点结构
///
/// 每个网格组中每个唯一的属性三元组对应一个实例。
/// 去重阶段只填写位置、法线和UV；切线与副切线由切线空间计算阶段写入。
/// 内存布局与下游二进制写出器一致，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - tangent: 12 bytes (3 * f32)
/// - bitangent: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - **总计**: 56 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    pub normal: [f32; 3],

    /// 切线向量 (tx, ty, tz)
    pub tangent: [f32; 3],

    /// 副切线向量 (bx, by, bz)
    pub bitangent: [f32; 3],

    /// 纹理坐标 (u, v)，V 轴已翻转
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// 创建一个尚未计算切线空间的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
            ..Default::default()
        }
    }
}
