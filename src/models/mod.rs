//! # 数据模型模块
//!
//! 定义 PROCAR 解析结果的层级数据模型及解析选项。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: options, procar

pub mod options;
pub mod procar;

pub use options::{ParseOptions, SpinMode};
pub use procar::{Band, Ion, IonRow, IonTable, IonTotalOnly, KPoint, Procar};
