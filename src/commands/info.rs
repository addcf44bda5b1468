//! # info 命令实现
//!
//! 显示文件头计数、解析选项与 k 点列表。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `utils/output.rs`

use super::{id_cell, load};
use crate::cli::inspect::InfoArgs;
use crate::utils::output;
use procar::error::Result;
use procar::models::{KPoint, ParseOptions};

use tabled::{Table, Tabled};

/// k 点表格行
#[derive(Debug, Clone, Tabled)]
struct KPointRow {
    #[tabled(rename = "K-point")]
    id: String,
    #[tabled(rename = "kx")]
    kx: String,
    #[tabled(rename = "ky")]
    ky: String,
    #[tabled(rename = "kz")]
    kz: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

impl From<&KPoint> for KPointRow {
    fn from(k: &KPoint) -> Self {
        KPointRow {
            id: id_cell(k.id),
            kx: format!("{:.8}", k.kx),
            ky: format!("{:.8}", k.ky),
            kz: format!("{:.8}", k.kz),
            weight: format!("{:.8}", k.weight),
        }
    }
}

/// 执行 info 命令
pub fn execute(args: InfoArgs, options: &ParseOptions) -> Result<()> {
    let procar = load(&args.input, options)?;

    output::print_header("PROCAR Summary");
    output::print_info(&format!("K-points:    {}", procar.kpoint_count()));
    output::print_info(&format!("Bands:       {}", procar.band_count()));
    output::print_info(&format!("Ions:        {}", procar.ion_count()));
    output::print_info(&format!(
        "Ion tables:  {} per band ({})",
        options.spin_mode.table_count(),
        options.spin_mode
    ));
    output::print_info(&format!(
        "Columns:     {}",
        if options.lm_decomposed {
            "lm-decomposed"
        } else {
            "totals only"
        }
    ));

    let rows: Vec<KPointRow> = procar.kpoints().iter().map(KPointRow::from).collect();
    output::print_header("K-points");
    println!("{}", Table::new(&rows));

    Ok(())
}
