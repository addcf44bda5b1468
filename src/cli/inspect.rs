//! # 查看类子命令 CLI 定义
//!
//! `info`、`bands`、`ions` 三个子命令的参数。所有编号均为 1 起。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/` 相应模块

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the PROCAR file
    pub input: PathBuf,
}

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Path to the PROCAR file
    pub input: PathBuf,

    /// K-point id (1-based)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub kpoint: u64,
}

/// ions 子命令参数
#[derive(Args, Debug)]
pub struct IonsArgs {
    /// Path to the PROCAR file
    pub input: PathBuf,

    /// K-point id (1-based)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub kpoint: u64,

    /// Band id (1-based)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub band: u64,

    /// Ion table id (1-based; 2-4 are the spin projections of a non-collinear run)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub table: u64,

    /// Also write the table to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
