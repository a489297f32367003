/// 材质记录
///
/// 由 `newmtl` 创建，随后的指令持续修改它，直到下一个 `newmtl` 或材质库结束。

use super::name::BoundedName;
use crate::math::Vector3;

/// 材质默认的高光幂
pub const DEFAULT_SPECULAR_POWER: f32 = 16.0;

/// 导出材质
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// 材质名称（`newmtl`）
    pub name: BoundedName,

    /// 反照率贴图路径（`map_Kd`）
    pub albedo_tex: BoundedName,

    /// 法线/凹凸贴图路径（`map_bump`，只取第一次出现）
    pub normal_tex: BoundedName,

    /// 高光颜色（`Ks`）
    pub specular_color: Vector3,

    /// 高光幂，`Ns` 不会修改它
    pub specular_power: f32,

    /// 高光系数（`Ns`）
    pub specular_coefficient: f32,
}

impl Material {
    /// 创建一个带默认参数的材质
    pub fn new(name: impl Into<BoundedName>) -> Self {
        Self {
            name: name.into(),
            albedo_tex: BoundedName::default(),
            normal_tex: BoundedName::default(),
            specular_color: Vector3::zeros(),
            specular_power: DEFAULT_SPECULAR_POWER,
            specular_coefficient: 0.0,
        }
    }

    /// 是否已经设置了法线贴图
    #[inline]
    pub fn has_normal_tex(&self) -> bool {
        !self.normal_tex.is_empty()
    }
}
