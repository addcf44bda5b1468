//! # bands 命令实现
//!
//! 列出某 k 点上各能带的能量与占据数。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `utils/output.rs`

use super::{id_cell, load, select};
use crate::cli::inspect::BandsArgs;
use crate::utils::output;
use procar::error::Result;
use procar::models::{Band, ParseOptions};

use tabled::{Table, Tabled};

/// 能带表格行
#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    id: String,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "Occupation")]
    occupation: String,
}

impl From<&Band> for BandRow {
    fn from(b: &Band) -> Self {
        BandRow {
            id: id_cell(b.id),
            energy: format!("{:.8}", b.energy),
            occupation: format!("{:.8}", b.occupation),
        }
    }
}

/// 执行 bands 命令
pub fn execute(args: BandsArgs, options: &ParseOptions) -> Result<()> {
    let procar = load(&args.input, options)?;
    let kpoint = select(
        procar.kpoint(args.kpoint as usize),
        "k-point",
        args.kpoint,
        procar.kpoint_count(),
    )?;

    output::print_header(&format!(
        "Bands at k-point {} ({:.8}, {:.8}, {:.8})",
        args.kpoint, kpoint.kx, kpoint.ky, kpoint.kz
    ));

    let rows: Vec<BandRow> = kpoint.bands().iter().map(BandRow::from).collect();
    println!("{}", Table::new(&rows));

    Ok(())
}
