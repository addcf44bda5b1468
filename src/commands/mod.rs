//! # 命令执行模块
//!
//! 实现各子命令的展示逻辑，只读取解析结果，不做任何分析。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `procar::parsers`, `procar::models`, `utils/`
//! - 子模块: info, bands, ions

pub mod bands;
pub mod info;
pub mod ions;

use crate::cli::Commands;
use crate::utils::{output, progress};
use procar::error::{ProcarError, Result};
use procar::models::{ParseOptions, Procar};
use procar::parsers;

use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands, options: &ParseOptions) -> Result<()> {
    match cmd {
        Commands::Info(args) => info::execute(args, options),
        Commands::Bands(args) => bands::execute(args, options),
        Commands::Ions(args) => ions::execute(args, options),
    }
}

/// 解析 PROCAR 并显示进度
fn load(path: &Path, options: &ParseOptions) -> Result<Procar> {
    let spinner = progress::create_spinner(&format!("Parsing '{}'", path.display()));
    let result = parsers::parse_procar_file(path, options);
    spinner.finish_and_clear();

    let procar = result?;
    output::print_success(&format!(
        "Parsed '{}' ({} k-points, {} bands, {} ions, {})",
        path.display(),
        procar.kpoint_count(),
        procar.band_count(),
        procar.ion_count(),
        options.spin_mode
    ));
    Ok(procar)
}

/// 按 1 起编号取元素，越界时给出有效范围
fn select<'a, T>(item: Option<&'a T>, kind: &str, id: u64, len: usize) -> Result<&'a T> {
    item.ok_or_else(|| ProcarError::IdOutOfRange {
        kind: kind.to_string(),
        id: id as usize,
        len,
    })
}

/// 编号列显示：未保存编号时显示 "-"
fn id_cell(id: Option<usize>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())
}
