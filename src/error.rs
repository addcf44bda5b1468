//! # 统一错误处理模块
//!
//! 定义 PROCAR 解析与命令行工具的所有错误类型，使用 `thiserror` 派生。
//!
//! 解析类错误均携带出错行的行号（从 1 开始）及原始内容，
//! 在出错行被检测到后立即向上传播，不做局部恢复。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// PROCAR 统一错误类型
#[derive(Error, Debug)]
pub enum ProcarError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading PROCAR: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed PROCAR header at line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("Malformed k-point header at line {line}: {content:?}")]
    MalformedKPointHeader { line: usize, content: String },

    #[error("Missing k-point weight at line {line}: {content:?}")]
    MissingWeight { line: usize, content: String },

    #[error("Malformed band header at line {line}: {content:?}")]
    MalformedBandHeader { line: usize, content: String },

    #[error("Malformed ion row at line {line}: {content:?}")]
    MalformedIonRow { line: usize, content: String },

    #[error("Unexpected end of PROCAR after line {line} while reading {expected}")]
    PrematureEof { line: usize, expected: String },

    #[error("Cannot parse {token:?} as a number at line {line}")]
    NumericParseFailure { line: usize, token: String },

    // ─────────────────────────────────────────────────────────────
    // 查询错误
    // ─────────────────────────────────────────────────────────────
    #[error("No {kind} with id {id} (valid ids: 1..={len})")]
    IdOutOfRange { kind: String, id: usize, len: usize },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ProcarError>;
