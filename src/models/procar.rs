//! # PROCAR 数据模型
//!
//! 严格的层级包含关系：
//! ```text
//! Procar ── KPoint × Nk ── Band × Nb ── IonTable × (1 | 4) ── IonRow × (Ni + 1)
//! ```
//! 所有实体在一次解析中构造完成，之后不再修改；子层级由父层级独占。
//! 所有按编号查询的方法均使用文件中的 1 起编号（离子表中 0 为汇总行）。
//!
//! ## 依赖关系
//! - 被 `parsers/procar.rs` 构造
//! - 被 `commands/` 读取并展示

use serde::Serialize;

use super::options::ParseOptions;

/// 一个 PROCAR 文件的完整内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Procar {
    options: ParseOptions,
    kpoint_count: usize,
    band_count: usize,
    ion_count: usize,
    kpoints: Vec<KPoint>,
}

impl Procar {
    pub(crate) fn new(
        options: ParseOptions,
        kpoint_count: usize,
        band_count: usize,
        ion_count: usize,
        kpoints: Vec<KPoint>,
    ) -> Self {
        Procar {
            options,
            kpoint_count,
            band_count,
            ion_count,
            kpoints,
        }
    }

    /// 解析时使用的选项
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// 文件头声明的 k 点数
    pub fn kpoint_count(&self) -> usize {
        self.kpoint_count
    }

    /// 文件头声明的能带数
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// 文件头声明的离子数
    pub fn ion_count(&self) -> usize {
        self.ion_count
    }

    pub fn kpoints(&self) -> &[KPoint] {
        &self.kpoints
    }

    /// 按 1 起编号获取 k 点
    pub fn kpoint(&self, id: usize) -> Option<&KPoint> {
        by_id(&self.kpoints, id)
    }
}

/// 倒空间中的一个采样点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KPoint {
    pub id: Option<usize>,
    pub kx: f64,
    pub ky: f64,
    pub kz: f64,
    pub weight: f64,
    bands: Vec<Band>,
}

impl KPoint {
    pub(crate) fn new(id: Option<usize>, coords: [f64; 3], weight: f64, bands: Vec<Band>) -> Self {
        KPoint {
            id,
            kx: coords[0],
            ky: coords[1],
            kz: coords[2],
            weight,
            bands,
        }
    }

    /// 坐标 (kx, ky, kz)
    pub fn coords(&self) -> [f64; 3] {
        [self.kx, self.ky, self.kz]
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// 按 1 起编号获取能带
    pub fn band(&self, id: usize) -> Option<&Band> {
        by_id(&self.bands, id)
    }
}

/// 某 k 点上的一条能带
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub id: Option<usize>,
    pub energy: f64,
    pub occupation: f64,
    tables: Vec<IonTable>,
}

impl Band {
    pub(crate) fn new(id: Option<usize>, energy: f64, occupation: f64, tables: Vec<IonTable>) -> Self {
        Band {
            id,
            energy,
            occupation,
            tables,
        }
    }

    /// 离子表，按文件顺序；非共线时依次为总量与三个自旋投影分量
    pub fn tables(&self) -> &[IonTable] {
        &self.tables
    }

    /// 按 1 起编号获取离子表
    pub fn table(&self, id: usize) -> Option<&IonTable> {
        by_id(&self.tables, id)
    }
}

/// 一个 (k 点, 能带, 自旋分量) 对应的轨道投影表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonTable {
    pub id: Option<usize>,
    ions: Vec<IonRow>,
    total: IonRow,
}

impl IonTable {
    pub(crate) fn new(id: Option<usize>, ions: Vec<IonRow>, total: IonRow) -> Self {
        IonTable { id, ions, total }
    }

    /// 各离子行，按文件顺序
    pub fn ions(&self) -> &[IonRow] {
        &self.ions
    }

    /// 汇总行（文件中标记为 `tot` 的一行）
    pub fn total_row(&self) -> &IonRow {
        &self.total
    }

    /// 按编号获取行：1..=Ni 为离子，0 为汇总行
    pub fn ion(&self, id: usize) -> Option<&IonRow> {
        match id {
            0 => Some(&self.total),
            _ => by_id(&self.ions, id),
        }
    }
}

/// 离子表中的一行，整个文档统一使用其中一种表示
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IonRow {
    /// 保留全部轨道分量
    Decomposed(Ion),
    /// 只保留 tot 列
    TotalOnly(IonTotalOnly),
}

impl IonRow {
    pub fn id(&self) -> Option<usize> {
        match self {
            IonRow::Decomposed(ion) => ion.id,
            IonRow::TotalOnly(ion) => ion.id,
        }
    }

    /// 行末 tot 列（取自文件，不重新求和）
    pub fn total(&self) -> f64 {
        match self {
            IonRow::Decomposed(ion) => ion.tot,
            IonRow::TotalOnly(ion) => ion.tot,
        }
    }

    /// 已保存分量的平方和
    pub fn square_sum(&self) -> f64 {
        match self {
            IonRow::Decomposed(ion) => ion.square_sum(),
            IonRow::TotalOnly(ion) => ion.square_sum(),
        }
    }

    /// 九个轨道分量；只保存 tot 时为 `None`
    pub fn orbitals(&self) -> Option<[f64; 9]> {
        match self {
            IonRow::Decomposed(ion) => Some(ion.orbitals()),
            IonRow::TotalOnly(_) => None,
        }
    }
}

/// lm 分解的离子行
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ion {
    pub id: Option<usize>,
    pub s: f64,
    pub py: f64,
    pub pz: f64,
    pub px: f64,
    pub dxy: f64,
    pub dyz: f64,
    pub dz2: f64,
    pub dxz: f64,
    pub dx2: f64,
    pub tot: f64,
}

impl Ion {
    /// 轨道列名，与 `orbitals()` 顺序一致
    pub const ORBITAL_LABELS: [&'static str; 9] =
        ["s", "py", "pz", "px", "dxy", "dyz", "dz2", "dxz", "dx2"];

    pub(crate) fn from_values(id: Option<usize>, orbitals: [f64; 9], tot: f64) -> Self {
        let [s, py, pz, px, dxy, dyz, dz2, dxz, dx2] = orbitals;
        Ion {
            id,
            s,
            py,
            pz,
            px,
            dxy,
            dyz,
            dz2,
            dxz,
            dx2,
            tot,
        }
    }

    pub fn orbitals(&self) -> [f64; 9] {
        [
            self.s, self.py, self.pz, self.px, self.dxy, self.dyz, self.dz2, self.dxz, self.dx2,
        ]
    }

    /// 九个轨道分量的平方和（不含 tot）
    pub fn square_sum(&self) -> f64 {
        self.orbitals().iter().map(|x| x * x).sum()
    }
}

/// 只保留 tot 的离子行
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IonTotalOnly {
    pub id: Option<usize>,
    pub tot: f64,
}

impl IonTotalOnly {
    pub fn square_sum(&self) -> f64 {
        self.tot * self.tot
    }
}

fn by_id<T>(items: &[T], id: usize) -> Option<&T> {
    id.checked_sub(1).and_then(|i| items.get(i))
}
