//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 文件头计数与 k 点列表
//! - `bands`: 某 k 点的能带能量与占据数
//! - `ions`: 某张离子表的逐离子投影权重（可导出 CSV）
//!
//! 全局参数决定解析选项（自旋模式、是否保留轨道分解、是否保存编号）。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: inspect

pub mod inspect;

use clap::{Args, Parser, Subcommand};
use procar::models::{ParseOptions, SpinMode};

/// procar - VASP PROCAR 查看工具
#[derive(Parser)]
#[command(name = "procar")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Inspect projected weights stored in a VASP PROCAR file", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub parse: ParseArgs,

    /// Print debug logs from the parser
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 解析选项参数（对所有子命令生效）
#[derive(Args, Debug, Clone, Copy)]
pub struct ParseArgs {
    /// The PROCAR comes from a non-collinear run (4 ion tables per band)
    #[arg(long, global = true, default_value_t = false)]
    pub non_collinear: bool,

    /// Keep only the 'tot' column of each ion row
    #[arg(long, global = true, default_value_t = false)]
    pub totals_only: bool,

    /// Do not store k-point/band/table/ion ids
    #[arg(long, global = true, default_value_t = false)]
    pub no_ids: bool,
}

impl ParseArgs {
    /// 转换为解析选项
    pub fn options(&self) -> ParseOptions {
        let spin_mode = if self.non_collinear {
            SpinMode::NonCollinear
        } else {
            SpinMode::Collinear
        };
        ParseOptions::new(spin_mode)
            .with_lm_decomposed(!self.totals_only)
            .with_store_ids(!self.no_ids)
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show header counts and the list of k-points
    Info(inspect::InfoArgs),

    /// List band energies and occupations at one k-point
    Bands(inspect::BandsArgs),

    /// Show the per-ion projections of one ion table
    Ions(inspect::IonsArgs),
}
