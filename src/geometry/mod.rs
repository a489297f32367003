/// 几何体加载和处理模块
///
/// 把 OBJ/MTL 文本场景转换为规范化的内存场景：每个网格去重后的顶点/索引缓冲区、
/// 扁平的材质表，以及网格与材质的绑定列表。
///
/// # 模块结构
///
/// - `vertex`: 导出顶点结构定义
/// - `name`: 定长名称
/// - `mesh`: 网格数据
/// - `material`: 材质记录
/// - `scene`: 跨文件累积的场景与模型绑定
/// - `dedup`: 属性三元组去重
/// - `loaders`: OBJ / MTL 加载器
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ + MTL)
///     ↓
/// ObjLoader（内部调用 MtlLoader）
///     ↓
/// 每个分组: deduplicate → compute_tangent_space
///     ↓
/// Scene（追加）
/// ```

pub mod vertex;
pub mod name;
pub mod mesh;
pub mod material;
pub mod scene;
pub mod dedup;
pub mod loaders;

// 重新导出常用类型
pub use vertex::Vertex;
pub use name::BoundedName;
pub use mesh::Mesh;
pub use material::Material;
pub use scene::{Model, Scene, SceneBatch, SceneStats};
pub use dedup::{AttributeIndex, Triangle};
