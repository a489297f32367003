//! 数学库模块
//!
//! 基于 `nalgebra` 提供导出流程需要的向量类型与几何处理函数。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2, Vector3
//! - **常量**：EPSILON
//! - **工具函数**：approx_eq 等
//! - **几何处理**：切线空间计算（见 geometry 子模块）

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数学常量
pub mod constants {
    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 浮点数近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 向量近似相等（逐分量）
    pub fn approx_eq_vec3(a: &Vector3, b: &Vector3, epsilon: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, epsilon))
    }

    /// `[f32; 3]` 转换为 Vector3
    #[inline]
    pub fn vec3(v: [f32; 3]) -> Vector3 {
        Vector3::new(v[0], v[1], v[2])
    }

    /// `[f32; 2]` 转换为 Vector2
    #[inline]
    pub fn vec2(v: [f32; 2]) -> Vector2 {
        Vector2::new(v[0], v[1])
    }
}

pub mod geometry;

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-7, constants::EPSILON));
        assert!(!approx_eq(1.0, 1.1, constants::EPSILON));
    }

    #[test]
    fn test_array_conversion() {
        let v = vec3([1.0, 2.0, 3.0]);
        assert!(approx_eq_vec3(&v, &Vector3::new(1.0, 2.0, 3.0), constants::EPSILON));
        assert_eq!(vec2([0.25, 0.75]), Vector2::new(0.25, 0.75));
    }
}
