//! Scene Exporter - 命令行入口
//!
//! 按顺序处理命令行给出的每个场景文件，全部追加到同一个场景中。
//! 没有任何开关；导出选项来自工作目录下的 `exporter.toml`（可选）。
//!
//! # 使用方法
//!
//! ```bash
//! scene_exporter ship.obj station.obj
//! ```
//!
//! 成功时退出码为 0；任何输入错误都会打印诊断信息并以退出码 1 结束。

use std::process::ExitCode;

use anyhow::Context;
use scene_exporter::core::config::{Config, DEFAULT_CONFIG_FILE};
use scene_exporter::core::log;
use scene_exporter::exporter::Exporter;
use scene_exporter::geometry::loaders::FileSystemSource;
use scene_exporter::geometry::SceneStats;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // 1. 加载配置（在初始化日志之前）；文件存在但无法解析时直接失败
    let config = match Config::from_file_or_default(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot load {}: {}", DEFAULT_CONFIG_FILE, e);
            return ExitCode::FAILURE;
        }
    };

    // 2. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "Scene exporter starting");

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        warn!("No input files given");
        return ExitCode::SUCCESS;
    }

    match run(&config, &paths) {
        Ok(stats) => {
            println!(
                "{} meshes, {} materials, {} models ({} vertices, {} triangles)",
                stats.meshes, stats.materials, stats.models, stats.vertices, stats.triangles
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            // 控制台日志层写 stderr，这里只输出一次
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 处理所有输入文件，任何错误都中止整个运行
fn run(config: &Config, paths: &[String]) -> anyhow::Result<SceneStats> {
    let mut exporter = Exporter::new(FileSystemSource, config);
    let stats = exporter
        .run(paths)
        .with_context(|| format!("Export of {} file(s) aborted", paths.len()))?;

    info!(
        meshes = stats.meshes,
        materials = stats.materials,
        models = stats.models,
        "Scene export finished"
    );
    Ok(stats)
}
