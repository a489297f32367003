//! Scene Exporter - 离线场景导出工具
//!
//! 把文本格式的 3D 场景描述（OBJ 几何 + MTL 材质库）转换为规范化的内存场景：
//! 每个网格去重后的顶点/索引缓冲区、扁平的材质表，以及网格与材质的绑定列表。
//! 多个输入文件按顺序处理并追加到同一个场景。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 向量类型与切线空间计算
//! - `geometry`: 顶点、网格、材质、场景、去重以及 OBJ/MTL 加载器
//! - `exporter`: 逐文件的导出流程
//!
//! # 使用示例
//!
//! ```no_run
//! use scene_exporter::core::Config;
//! use scene_exporter::exporter::Exporter;
//! use scene_exporter::geometry::loaders::FileSystemSource;
//!
//! let mut exporter = Exporter::new(FileSystemSource, &Config::default());
//! let stats = exporter.run(["ship.obj", "station.obj"])?;
//! println!("网格数: {}", stats.meshes);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod exporter;
