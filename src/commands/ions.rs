//! # ions 命令实现
//!
//! 显示某 (k 点, 能带, 离子表) 的逐离子投影权重，末行为汇总行；
//! 可同时导出为 CSV。只保存 tot 时仅输出 tot 列。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `utils/output.rs`

use super::{id_cell, load, select};
use crate::cli::inspect::IonsArgs;
use crate::utils::output;
use procar::error::{ProcarError, Result};
use procar::models::{Ion, IonRow, IonTable, ParseOptions};

use std::path::Path;
use tabled::builder::Builder;

/// 执行 ions 命令
pub fn execute(args: IonsArgs, options: &ParseOptions) -> Result<()> {
    let procar = load(&args.input, options)?;
    let kpoint = select(
        procar.kpoint(args.kpoint as usize),
        "k-point",
        args.kpoint,
        procar.kpoint_count(),
    )?;
    let band = select(
        kpoint.band(args.band as usize),
        "band",
        args.band,
        procar.band_count(),
    )?;
    let table = select(
        band.table(args.table as usize),
        "ion table",
        args.table,
        options.spin_mode.table_count(),
    )?;

    let header = column_labels(options.lm_decomposed);
    let records = table_records(table);

    output::print_header(&format!(
        "K-point {} / band {} (E = {:.6} eV) / table {}",
        args.kpoint, args.band, band.energy, args.table
    ));

    let mut builder = Builder::default();
    builder.push_record(header.clone());
    for record in &records {
        builder.push_record(record.clone());
    }
    println!("{}", builder.build());

    if let Some(ref path) = args.csv {
        save_records_csv(&header, &records, path)?;
        output::print_success(&format!("Table saved to '{}'", path.display()));
    }

    Ok(())
}

/// 表头：离子编号 + 轨道列（若保留）+ tot
fn column_labels(lm_decomposed: bool) -> Vec<String> {
    let mut labels = vec!["ion".to_string()];
    if lm_decomposed {
        labels.extend(Ion::ORBITAL_LABELS.iter().map(|s| s.to_string()));
    }
    labels.push("tot".to_string());
    labels
}

/// 各离子行加汇总行，汇总行标记为 "tot"
fn table_records(table: &IonTable) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = table
        .ions()
        .iter()
        .map(|row| row_record(id_cell(row.id()), row))
        .collect();
    records.push(row_record("tot".to_string(), table.total_row()));
    records
}

fn row_record(label: String, row: &IonRow) -> Vec<String> {
    let mut record = vec![label];
    if let Some(orbitals) = row.orbitals() {
        record.extend(orbitals.iter().map(|v| format!("{:.3}", v)));
    }
    record.push(format!("{:.3}", row.total()));
    record
}

/// 保存到 CSV
fn save_records_csv(header: &[String], records: &[Vec<String>], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(ProcarError::CsvError)?;

    wtr.write_record(header).map_err(ProcarError::CsvError)?;
    for record in records {
        wtr.write_record(record).map_err(ProcarError::CsvError)?;
    }

    wtr.flush().map_err(|e| ProcarError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::SAMPLE;
    use procar::parsers::parse_procar_content;

    #[test]
    fn test_records_lm_decomposed() {
        let procar = parse_procar_content(SAMPLE, &ParseOptions::default()).unwrap();
        let table = procar.kpoints()[0].bands()[1].table(1).unwrap();

        let header = column_labels(true);
        let records = table_records(table);
        assert_eq!(header.len(), 11);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.len() == header.len()));
        assert_eq!(records[1][0], "2");
        assert_eq!(records[1][2], "0.000");
        assert_eq!(records[1][3], "0.400");
        assert_eq!(records[2][0], "tot");
        assert_eq!(records[2][10], "0.700");
    }

    #[test]
    fn test_records_totals_only() {
        let options = ParseOptions::default().with_lm_decomposed(false);
        let procar = parse_procar_content(SAMPLE, &options).unwrap();
        let table = procar.kpoints()[0].bands()[0].table(1).unwrap();

        assert_eq!(column_labels(false), vec!["ion", "tot"]);
        let records = table_records(table);
        assert_eq!(records[0], vec!["1", "0.160"]);
        assert_eq!(records[2], vec!["tot", "0.375"]);
    }
}
