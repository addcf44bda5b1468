//! # 行读取与字段提取原语
//!
//! PROCAR 是纯按行定位的格式，本模块提供：
//! - `LineCursor`：只进不退的行游标，记录已消费的行号
//! - `slice_columns`：按固定字符列截取字段（负号可能与前一个数紧贴）
//! - `split_tokens`：按空白分词（列间距可靠的字段）
//!
//! 两种提取方式刻意分开，各字段使用哪一种由调用处决定。
//!
//! ## 依赖关系
//! - 被 `parsers/procar.rs` 使用

use crate::error::{ProcarError, Result};
use std::io::{BufRead, Lines};
use std::ops::Range;

/// 只进的行游标
pub struct LineCursor<R> {
    lines: Lines<R>,
    /// 已消费的行数，也即最后读取行的 1 起行号
    line_no: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        LineCursor {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// 最后读取行的行号（尚未读取时为 0）
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// 读取下一行，输入结束时返回 `None`
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    /// 读取下一行，输入结束视为 `PrematureEof`
    pub fn expect_line(&mut self, expected: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| ProcarError::PrematureEof {
            line: self.line_no,
            expected: expected.to_string(),
        })
    }

    /// 跳过一行必需的行（空行或列标题），内容不检查
    pub fn skip_line(&mut self, expected: &str) -> Result<()> {
        self.expect_line(expected).map(|_| ())
    }

    /// 跳过一个块尾分隔空行；文件末尾缺失时不报错
    pub fn skip_separator(&mut self) -> Result<()> {
        self.next_line().map(|_| ())
    }
}

/// 按半开区间 `[start, end)` 的字符列截取字段，行长不足时返回 `None`
pub fn slice_columns<'a>(line: &'a str, ranges: &[Range<usize>]) -> Option<Vec<&'a str>> {
    ranges.iter().map(|r| line.get(r.clone())).collect()
}

/// 按空白分词
pub fn split_tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// 解析实数，失败时报告所在行号
pub fn parse_real(token: &str, line: usize) -> Result<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| ProcarError::NumericParseFailure {
            line,
            token: token.to_string(),
        })
}
