//! # 解析选项
//!
//! 调用方在解析前给定的配置：自旋模式、是否保留 lm 分解、是否保存编号。
//! 这些信息无法从 PROCAR 文件本身推断。
//!
//! ## 依赖关系
//! - 被 `parsers/procar.rs` 使用（按引用逐层传递）
//! - 被 `commands/` 根据命令行参数构造

use serde::Serialize;

/// 自旋模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SpinMode {
    /// 共线计算：每个能带一张离子表
    #[default]
    Collinear,
    /// 非共线计算：每个能带四张离子表（总量 + x/y/z 自旋投影，按文件顺序）
    NonCollinear,
}

impl SpinMode {
    /// 每个能带包含的离子表数量
    pub fn table_count(self) -> usize {
        match self {
            SpinMode::Collinear => 1,
            SpinMode::NonCollinear => 4,
        }
    }
}

impl std::fmt::Display for SpinMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinMode::Collinear => write!(f, "collinear"),
            SpinMode::NonCollinear => write!(f, "non-collinear"),
        }
    }
}

/// PROCAR 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseOptions {
    /// 自旋模式
    pub spin_mode: SpinMode,

    /// 是否保留 s/p/d 各轨道分量（否则每行只保存 tot）
    pub lm_decomposed: bool,

    /// 是否在内存中保存各层级的编号
    pub store_ids: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            spin_mode: SpinMode::Collinear,
            lm_decomposed: true,
            store_ids: true,
        }
    }
}

impl ParseOptions {
    pub fn new(spin_mode: SpinMode) -> Self {
        ParseOptions {
            spin_mode,
            ..Default::default()
        }
    }

    /// 设置是否保留轨道分解
    pub fn with_lm_decomposed(mut self, lm_decomposed: bool) -> Self {
        self.lm_decomposed = lm_decomposed;
        self
    }

    /// 设置是否保存编号
    pub fn with_store_ids(mut self, store_ids: bool) -> Self {
        self.store_ids = store_ids;
        self
    }

    /// 按选项决定是否保留编号
    pub(crate) fn id(&self, id: usize) -> Option<usize> {
        self.store_ids.then_some(id)
    }
}
