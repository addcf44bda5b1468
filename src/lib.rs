//! # procar - VASP PROCAR 解析库
//!
//! 将 PROCAR 文件（按 k 点、能带、离子给出的投影权重）一次性解析为层级数据模型。
//!
//! ```no_run
//! use procar::models::{ParseOptions, SpinMode};
//! use procar::parsers::parse_procar_file;
//! use std::path::Path;
//!
//! let options = ParseOptions::new(SpinMode::NonCollinear).with_lm_decomposed(false);
//! let procar = parse_procar_file(Path::new("PROCAR"), &options)?;
//! let tot = procar
//!     .kpoint(1)
//!     .and_then(|k| k.band(1))
//!     .and_then(|b| b.table(1))
//!     .and_then(|t| t.ion(20))
//!     .map(|ion| ion.total());
//! println!("{:?}", tot);
//! # Ok::<(), procar::error::ProcarError>(())
//! ```
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/    (行游标与逐层读取器)
//!   ├── models/     (数据模型与解析选项)
//!   └── error.rs    (错误处理)
//! ```

pub mod error;
pub mod models;
pub mod parsers;

pub use error::{ProcarError, Result};
pub use models::{ParseOptions, Procar, SpinMode};
pub use parsers::{parse_procar_content, parse_procar_file, parse_procar_reader, parse_procar_seekable};
