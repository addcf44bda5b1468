//! # 解析器模块
//!
//! 提供 VASP PROCAR 文件的解析入口：文件路径、可定位读取器、任意行读取器、内存字符串。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: lines, procar

pub mod lines;
pub mod procar;

use crate::error::{ProcarError, Result};
use crate::models::{ParseOptions, Procar};
use lines::LineCursor;

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use tracing::warn;

/// 解析 PROCAR 文件
pub fn parse_procar_file(path: &Path, options: &ParseOptions) -> Result<Procar> {
    let file = File::open(path).map_err(|e| ProcarError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_procar_seekable(BufReader::new(file), options)
}

/// 先尝试回到输入开头再解析；无法定位时只给出警告，假定已处于开头
pub fn parse_procar_seekable<R: BufRead + Seek>(mut reader: R, options: &ParseOptions) -> Result<Procar> {
    if let Err(e) = reader.seek(SeekFrom::Start(0)) {
        warn!(error = %e, "Couldn't seek to start of PROCAR input, assuming it is already positioned there");
    }

    parse_procar_reader(reader, options)
}

/// 从读取器当前位置开始解析
pub fn parse_procar_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Procar> {
    let mut cursor = LineCursor::new(reader);
    procar::read_procar(&mut cursor, options)
}

/// 从字符串内容解析 PROCAR
pub fn parse_procar_content(content: &str, options: &ParseOptions) -> Result<Procar> {
    parse_procar_reader(content.as_bytes(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IonRow, SpinMode};
    use std::io::{self, Cursor, Read};

    /// 1 个 k 点、1 条能带、2 个离子的最小共线文档
    const MINIMAL: &str = "PROCAR lm decomposed
# of k-points:    1         # of bands:   1         # of ions:   2

 k-point    1 :    0.00000000 0.50000000-0.50000000     weight = 0.25000000

band     1 # energy   -5.50000000 # occ.  2.00000000

ion      s     py     pz     px    dxy    dyz    dz2    dxz    dx2    tot
    1  0.100  0.010  0.020  0.030  0.000  0.000  0.000  0.000  0.000  0.160
    2  0.200  0.000  0.000  0.000  0.001  0.002  0.003  0.004  0.005  0.215
tot    0.300  0.010  0.020  0.030  0.001  0.002  0.003  0.004  0.005  0.375


";

    fn ion_line(id: &str, tot: f64) -> String {
        format!(
            "{:<5}  0.010  0.020  0.030  0.040  0.000  0.000  0.000  0.000  0.000  {:.3}\n",
            id, tot
        )
    }

    /// 生成任意规模的合成文档
    fn synthetic(nk: usize, nb: usize, ni: usize, tables: usize) -> String {
        let mut text = format!(
            "PROCAR lm decomposed\n# of k-points:  {}         # of bands:  {}         # of ions:  {}\n\n",
            nk, nb, ni
        );
        for k in 1..=nk {
            text.push_str(&format!(
                " k-point {:>4} :    0.{:08} 0.00000000-0.25000000     weight = 0.{:08}\n\n",
                k,
                k * 1000,
                k * 5
            ));
            for b in 1..=nb {
                text.push_str(&format!(
                    "band {:>5} # energy {:>13.8} # occ.  {:.8}\n\n",
                    b,
                    -10.0 + b as f64,
                    1.0
                ));
                text.push_str("ion      s     py     pz     px    dxy    dyz    dz2    dxz    dx2    tot\n");
                for _ in 0..tables {
                    for i in 1..=ni {
                        text.push_str(&ion_line(&i.to_string(), 0.1 * i as f64));
                    }
                    text.push_str(&ion_line("tot", 0.5));
                }
                text.push('\n');
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_minimal_document() {
        let procar = parse_procar_content(MINIMAL, &ParseOptions::default()).unwrap();
        assert_eq!(procar.kpoint_count(), 1);
        assert_eq!(procar.band_count(), 1);
        assert_eq!(procar.ion_count(), 2);

        let k = procar.kpoint(1).unwrap();
        assert_eq!(k.kx, 0.0);
        assert_eq!(k.ky, 0.5);
        assert_eq!(k.kz, -0.5);
        assert_eq!(k.weight, 0.25);

        let band = k.band(1).unwrap();
        assert_eq!(band.energy, -5.5);
        assert_eq!(band.occupation, 2.0);

        let table = band.table(1).unwrap();
        assert_eq!(table.ions().len(), 2);
        assert_eq!(table.ion(2).unwrap().total(), 0.215);
        assert_eq!(table.ion(0).unwrap().total(), 0.375);
        assert_eq!(table.ion(0).unwrap().id(), Some(0));
    }

    #[test]
    fn test_structure_counts_collinear_and_non_collinear() {
        for (mode, tables) in [(SpinMode::Collinear, 1), (SpinMode::NonCollinear, 4)] {
            let text = synthetic(3, 2, 4, tables);
            let procar = parse_procar_content(&text, &ParseOptions::new(mode)).unwrap();

            assert_eq!(procar.kpoints().len(), procar.kpoint_count());
            for (ki, k) in procar.kpoints().iter().enumerate() {
                assert_eq!(k.id, Some(ki + 1));
                assert_eq!(k.bands().len(), procar.band_count());
                for (bi, band) in k.bands().iter().enumerate() {
                    assert_eq!(band.id, Some(bi + 1));
                    assert_eq!(band.tables().len(), tables);
                    for table in band.tables() {
                        assert_eq!(table.ions().len(), procar.ion_count());
                        for (ii, ion) in table.ions().iter().enumerate() {
                            assert_eq!(ion.id(), Some(ii + 1));
                        }
                        assert_eq!(table.total_row().id(), Some(0));
                    }
                }
            }
        }
    }

    #[test]
    fn test_kpoint_coordinates_and_weights() {
        let text = synthetic(2, 1, 1, 1);
        let procar = parse_procar_content(&text, &ParseOptions::default()).unwrap();
        let k2 = procar.kpoint(2).unwrap();
        assert_eq!(k2.coords(), [0.00002, 0.0, -0.25]);
        assert_eq!(k2.weight, 0.00000010);
        assert_eq!(k2.band(1).unwrap().energy, -9.0);
    }

    #[test]
    fn test_totals_only_without_ids() {
        let options = ParseOptions::default()
            .with_lm_decomposed(false)
            .with_store_ids(false);
        let procar = parse_procar_content(MINIMAL, &options).unwrap();
        let k = procar.kpoint(1).unwrap();
        assert_eq!(k.id, None);

        let band = k.band(1).unwrap();
        assert_eq!(band.id, None);
        let table = band.table(1).unwrap();
        assert_eq!(table.id, None);
        for row in table.ions().iter().chain(std::iter::once(table.total_row())) {
            assert!(matches!(row, IonRow::TotalOnly(_)));
            assert_eq!(row.id(), None);
            assert_eq!(row.square_sum(), row.total() * row.total());
        }
    }

    #[test]
    fn test_trailing_content_ignored() {
        let text = format!("{}garbage after the last k-point\n", MINIMAL);
        assert!(parse_procar_content(&text, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_final_separators_tolerated() {
        let text = MINIMAL.trim_end();
        assert!(parse_procar_content(text, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_truncated_mid_table() {
        let cut = MINIMAL.find("tot    0.300").unwrap();
        let err = parse_procar_content(&MINIMAL[..cut], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcarError::PrematureEof { line: 10, .. }));
    }

    #[test]
    fn test_huge_declared_counts_fail_cleanly() {
        let text = "PROCAR lm decomposed\n# of k-points: 100000000000000   # of bands: 1   # of ions: 1\n\n";
        let err = parse_procar_content(text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcarError::PrematureEof { line: 3, .. }));

        let text = format!(
            "PROCAR lm decomposed\n# of k-points: 1   # of bands: {}   # of ions: 1\n\n{}\n\n",
            usize::MAX,
            " k-point    1 :    0.00000000 0.50000000-0.50000000     weight = 0.25000000"
        );
        let err = parse_procar_content(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcarError::PrematureEof { line: 5, .. }));
    }

    #[test]
    fn test_malformed_header() {
        let text = MINIMAL.replace("# of ions:   2", "# of ions: ?");
        let err = parse_procar_content(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcarError::MalformedHeader { line: 2, .. }));
    }

    #[test]
    fn test_short_kpoint_header() {
        let text = MINIMAL.replace(
            " k-point    1 :    0.00000000 0.50000000-0.50000000     weight = 0.25000000",
            " k-point    1 :    0.0",
        );
        let err = parse_procar_content(&text, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, ProcarError::MalformedKPointHeader { line: 4, .. }));
    }

    #[test]
    fn test_non_collinear_against_collinear_file_fails() {
        let err = parse_procar_content(MINIMAL, &ParseOptions::new(SpinMode::NonCollinear))
            .unwrap_err();
        assert!(matches!(err, ProcarError::MalformedIonRow { line: 12, .. }));
    }

    /// 不支持定位的读取器，用于检验警告后继续解析
    struct Unseekable(Cursor<Vec<u8>>);

    impl Read for Unseekable {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl BufRead for Unseekable {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.0.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.0.consume(amt)
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "pipe"))
        }
    }

    #[test]
    fn test_unseekable_input_still_parses() {
        let reader = Unseekable(Cursor::new(MINIMAL.as_bytes().to_vec()));
        let procar = parse_procar_seekable(reader, &ParseOptions::default()).unwrap();
        assert_eq!(procar.kpoints().len(), 1);
    }

    #[test]
    fn test_seekable_rewinds() {
        let mut reader = Cursor::new(MINIMAL.as_bytes().to_vec());
        reader.seek(SeekFrom::End(0)).unwrap();
        let procar = parse_procar_seekable(reader, &ParseOptions::default()).unwrap();
        assert_eq!(procar.ion_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_procar_file(Path::new("/nonexistent/PROCAR"), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProcarError::FileReadError { .. }));
    }
}
