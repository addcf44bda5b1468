//! # VASP PROCAR 格式解析器
//!
//! 自顶向下、只进不退地读取 PROCAR，逐层构造数据模型。
//!
//! ## PROCAR 格式说明
//! ```text
//! PROCAR lm decomposed                                       # 第 1 行，忽略
//! # of k-points:    2         # of bands:   8         # of ions:   2
//!                                                            # 空行
//!  k-point    1 :    0.00000000 0.00000000 0.00000000     weight = 0.25000000
//!                                                            # 空行
//! band     1 # energy   -5.12345678 # occ.  2.00000000
//!                                                            # 空行
//! ion      s     py     pz     px    dxy    dyz    dz2    dxz    dx2    tot
//!     1  0.123  0.000  0.000  0.000  0.000  0.000  0.000  0.000  0.000  0.123
//!     2  ...
//! tot    ...                                                 # 汇总行
//!                                                            # 每条能带后空行
//!                                                            # 每个 k 点后空行
//! ```
//! - k 点坐标位于固定列 `[18,29)`, `[29,40)`, `[40,51)`，负号会与前一个数紧贴，
//!   因此只能按列截取；权重为该行最后一个空白分隔的字段。
//! - 能带行的第 5 个字段为能量，最后一个字段为占据数。
//! - 非共线计算每条能带有 4 张离子表，按文件顺序紧接排列，中间无空行。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/lines.rs`、`models/`

use super::lines::{parse_real, slice_columns, split_tokens, LineCursor};
use crate::error::{ProcarError, Result};
use crate::models::{Band, Ion, IonRow, IonTable, IonTotalOnly, KPoint, ParseOptions, Procar};

use regex::Regex;
use std::io::BufRead;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

/// k 点坐标所在的字符列（0 起，半开区间）
const KPOINT_COLUMNS: [Range<usize>; 3] = [18..29, 29..40, 40..51];

/// 权重字段必须位于坐标列之后
const KPOINT_WEIGHT_START: usize = 51;

/// 能量在能带行中的字段序号（0 起）
const BAND_ENERGY_TOKEN: usize = 4;

/// 离子行的最少字段数：编号 + 9 个轨道 + tot
const ION_ROW_TOKENS: usize = 11;

/// tot 列的字段序号
const ION_TOTAL_TOKEN: usize = 10;

/// 文件头中的各项计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kpoints: usize,
    pub bands: usize,
    pub ions: usize,
}

/// 读取完整的 PROCAR 文档
pub fn read_procar<R: BufRead>(cursor: &mut LineCursor<R>, options: &ParseOptions) -> Result<Procar> {
    let header = read_header(cursor)?;
    debug!(
        kpoints = header.kpoints,
        bands = header.bands,
        ions = header.ions,
        spin_mode = %options.spin_mode,
        "PROCAR header"
    );

    // 计数来自文件头，不据此预分配
    let kpoints = (1..=header.kpoints)
        .map(|id| -> Result<KPoint> {
            let kpoint = read_kpoint(cursor, options, &header, id)?;
            cursor.skip_separator()?;
            Ok(kpoint)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(lines = cursor.line_no(), "PROCAR parsed");

    Ok(Procar::new(
        *options,
        header.kpoints,
        header.bands,
        header.ions,
        kpoints,
    ))
}

/// 读取文件头三行，返回 k 点、能带、离子数
pub fn read_header<R: BufRead>(cursor: &mut LineCursor<R>) -> Result<Header> {
    // 第 1 行：标题，内容忽略
    header_line(cursor, "title line")?;

    // 第 2 行：三个整数，前后标签文本不限
    let counts_line = header_line(cursor, "counts line")?;
    let counts: Vec<usize> = integer_pattern()
        .find_iter(&counts_line)
        .map(|m| m.as_str().parse::<usize>())
        .take(3)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| ProcarError::MalformedHeader {
            line: cursor.line_no(),
            reason: format!("count out of range: {}", e),
        })?;

    let &[kpoints, bands, ions] = counts.as_slice() else {
        return Err(ProcarError::MalformedHeader {
            line: cursor.line_no(),
            reason: format!("expected 3 integers, found {}", counts.len()),
        });
    };

    // 第 3 行：空行
    header_line(cursor, "blank line after counts")?;

    Ok(Header {
        kpoints,
        bands,
        ions,
    })
}

/// 读取一个 k 点块（含其全部能带）
pub fn read_kpoint<R: BufRead>(
    cursor: &mut LineCursor<R>,
    options: &ParseOptions,
    header: &Header,
    id: usize,
) -> Result<KPoint> {
    let line = cursor.expect_line("k-point header")?;
    let line_no = cursor.line_no();
    let malformed = || ProcarError::MalformedKPointHeader {
        line: line_no,
        content: line.clone(),
    };

    let fields = slice_columns(&line, &KPOINT_COLUMNS).ok_or_else(malformed)?;
    let mut coords = [0.0; 3];
    for (coord, field) in coords.iter_mut().zip(&fields) {
        *coord = parse_real(field, line_no).map_err(|_| malformed())?;
    }

    let weight = kpoint_weight(&line, line_no)?;

    cursor.skip_line("blank line after k-point header")?;

    let bands = (1..=header.bands)
        .map(|band_id| -> Result<Band> {
            let band = read_band(cursor, options, header, band_id)?;
            cursor.skip_separator()?;
            Ok(band)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(KPoint::new(options.id(id), coords, weight, bands))
}

/// 读取一条能带（含 1 或 4 张离子表）
pub fn read_band<R: BufRead>(
    cursor: &mut LineCursor<R>,
    options: &ParseOptions,
    header: &Header,
    id: usize,
) -> Result<Band> {
    let line = cursor.expect_line("band header")?;
    let line_no = cursor.line_no();
    let tokens = split_tokens(&line);

    if tokens.len() <= BAND_ENERGY_TOKEN {
        return Err(ProcarError::MalformedBandHeader {
            line: line_no,
            content: line.clone(),
        });
    }
    let energy = parse_real(tokens[BAND_ENERGY_TOKEN], line_no)?;
    let occupation = parse_real(tokens[tokens.len() - 1], line_no)?;

    cursor.skip_line("blank line after band header")?;
    // 列标题行 "ion s py pz ..."
    cursor.skip_line("ion table column labels")?;

    let tables = (1..=options.spin_mode.table_count())
        .map(|table_id| read_ion_table(cursor, options, header, table_id))
        .collect::<Result<Vec<_>>>()?;

    Ok(Band::new(options.id(id), energy, occupation, tables))
}

/// 读取一张离子表：Ni 行离子 + 1 行汇总
pub fn read_ion_table<R: BufRead>(
    cursor: &mut LineCursor<R>,
    options: &ParseOptions,
    header: &Header,
    id: usize,
) -> Result<IonTable> {
    let ions = (1..=header.ions)
        .map(|ion_id| read_ion_row(cursor, options, ion_id))
        .collect::<Result<Vec<_>>>()?;
    let total = read_ion_row(cursor, options, 0)?;

    Ok(IonTable::new(options.id(id), ions, total))
}

/// 读取一行离子数据；`id` 为 0 表示汇总行
pub fn read_ion_row<R: BufRead>(
    cursor: &mut LineCursor<R>,
    options: &ParseOptions,
    id: usize,
) -> Result<IonRow> {
    let line = cursor.expect_line("ion row")?;
    decode_ion_row(&line, cursor.line_no(), options, id)
}

/// 按固定字段序号解码离子行
pub fn decode_ion_row(line: &str, line_no: usize, options: &ParseOptions, id: usize) -> Result<IonRow> {
    let tokens = split_tokens(line);
    let malformed = || ProcarError::MalformedIonRow {
        line: line_no,
        content: line.to_string(),
    };

    if tokens.len() < ION_ROW_TOKENS {
        return Err(malformed());
    }

    let tot = parse_real(tokens[ION_TOTAL_TOKEN], line_no).map_err(|_| malformed())?;

    if !options.lm_decomposed {
        return Ok(IonRow::TotalOnly(IonTotalOnly {
            id: options.id(id),
            tot,
        }));
    }

    let mut orbitals = [0.0; 9];
    for (value, token) in orbitals.iter_mut().zip(&tokens[1..ION_TOTAL_TOKEN]) {
        *value = parse_real(token, line_no).map_err(|_| malformed())?;
    }

    Ok(IonRow::Decomposed(Ion::from_values(
        options.id(id),
        orbitals,
        tot,
    )))
}

/// 提取 k 点权重：行末最后一个空白分隔字段，须位于坐标列之后
fn kpoint_weight(line: &str, line_no: usize) -> Result<f64> {
    let trimmed = line.trim_end();
    let token = match trimmed.split_whitespace().last() {
        Some(token) if trimmed.len() - token.len() >= KPOINT_WEIGHT_START => token,
        _ => {
            return Err(ProcarError::MissingWeight {
                line: line_no,
                content: line.to_string(),
            })
        }
    };

    parse_real(token, line_no)
}

fn header_line<R: BufRead>(cursor: &mut LineCursor<R>, what: &str) -> Result<String> {
    cursor.next_line()?.ok_or_else(|| ProcarError::MalformedHeader {
        line: cursor.line_no(),
        reason: format!("input ended before {}", what),
    })
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("integer pattern is valid"))
}
