//! # 基底几何与衍射级次解析
//!
//! 由基底配置、束电压和候选簇计算单个 (x, sinθ) 样本。
//!
//! ## 算法概述
//! - 111 表面：闭式解，sinθ = λ/d，d = (a/√2)·(√3/2)，x 取首簇半径中位数
//! - 110 表面 Au：以首簇最小角为基准角，按 n = ⌊x/λ/100⌋ + 1 解析级次，
//!   n ≤ 2 的匹配簇给出 sinθ = n·λ/(2a)
//! - 110 表面 Ag/Cu：两个基准角槽位对应 n = 1 与 n = √2 两个角族，
//!   sinθ = n·λ/a
//!
//! ## 依赖关系
//! - 被 `rprime/pipeline.rs` 调用
//! - 使用 `rprime/cluster.rs` 的 Cluster
//! - 使用 `models/base.rs`

use crate::models::{BaseType, Kind, Sample, Surface};
use crate::rprime::cluster::Cluster;

/// 基准角匹配容差（弧度）
const ANGLE_TOL: f64 = 0.1;
/// 电子波长常数：λ(V) = sqrt(150.4 / V)（Å，V 单位伏特）
const WAVELENGTH_CONST: f64 = 150.4;

/// 束电压对应的电子波长 (Å)
pub fn electron_wavelength(voltage: f64) -> f64 {
    (WAVELENGTH_CONST / voltage).sqrt()
}

/// 基准角累加器：110 表面最多两个角族的参考最小角
///
/// 显式随调用传递，作用域由管线决定（逐图像重置或整轮持续）。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThetaBaseline {
    slots: [Option<f64>; 2],
}

impl ThetaBaseline {
    pub fn new() -> Self {
        ThetaBaseline::default()
    }

    /// 清空两个槽位
    pub fn reset(&mut self) {
        self.slots = [None; 2];
    }

    /// 槽位未占用时记录参考角
    fn observe(&mut self, slot: usize, theta: f64) {
        if self.slots[slot].is_none() {
            self.slots[slot] = Some(theta);
        }
    }

    /// 槽位已占用且角差在容差内
    fn matches(&self, slot: usize, theta: f64) -> bool {
        match self.slots[slot] {
            Some(reference) => (reference - theta).abs() < ANGLE_TOL,
            None => false,
        }
    }
}

/// 衍射几何解析器
#[derive(Debug, Clone, Copy)]
pub struct LatticeModel {
    base: BaseType,
}

impl LatticeModel {
    pub fn new(base: BaseType) -> Self {
        LatticeModel { base }
    }

    /// 从簇列表解析一个样本；无簇满足判定规则时返回 None
    pub fn resolve_sample(
        &self,
        voltage: f64,
        clusters: &[Cluster],
        baseline: &mut ThetaBaseline,
    ) -> Option<Sample> {
        match self.base.surface {
            Surface::S111 => self.resolve_111(voltage, clusters),
            Surface::S110 => match self.base.kind {
                Kind::Au => self.resolve_110_au(voltage, clusters, baseline),
                Kind::Ag | Kind::Cu => self.resolve_110_two_family(voltage, clusters, baseline),
            },
        }
    }

    /// 111 表面：闭式解，级次解析不适用
    fn resolve_111(&self, voltage: f64, clusters: &[Cluster]) -> Option<Sample> {
        let a = self.base.kind.lattice_constant();
        let d = (a / 2.0_f64.sqrt()) * 3.0_f64.sqrt() / 2.0;
        let sin_theta = electron_wavelength(voltage) / d;

        clusters
            .first()
            .map(|cluster| Sample::new(cluster.median_radius(), sin_theta))
    }

    /// 110 表面 Au：单基准角，级次 n ∈ {1, 2}
    fn resolve_110_au(
        &self,
        voltage: f64,
        clusters: &[Cluster],
        baseline: &mut ThetaBaseline,
    ) -> Option<Sample> {
        if let Some(first) = clusters.first() {
            baseline.observe(0, first.min_theta());
        }

        let a = self.base.kind.lattice_constant();
        let lambda = electron_wavelength(voltage);

        for cluster in clusters {
            if baseline.matches(0, cluster.min_theta()) {
                let x = cluster.median_radius();
                let n = (x / lambda / 100.0).floor() + 1.0;
                let sin_theta = n / (2.0 * a) * lambda;
                if n > 2.0 {
                    continue;
                }
                return Some(Sample::new(x, sin_theta));
            }
        }

        None
    }

    /// 110 表面 Ag/Cu：双基准角，槽位 0 → n = 1，槽位 1 → n = √2
    fn resolve_110_two_family(
        &self,
        voltage: f64,
        clusters: &[Cluster],
        baseline: &mut ThetaBaseline,
    ) -> Option<Sample> {
        if let Some(first) = clusters.first() {
            baseline.observe(0, first.min_theta());
        }
        if clusters.len() > 1 {
            baseline.observe(1, clusters[1].min_theta());
        }

        let a = self.base.kind.lattice_constant();

        for (j, cluster) in clusters.iter().enumerate() {
            if j > 2 {
                break;
            }
            for slot in 0..2 {
                if baseline.matches(slot, cluster.min_theta()) {
                    let n = if slot == 0 { 1.0 } else { 2.0_f64.sqrt() };
                    let sin_theta = n * electron_wavelength(voltage) / a;
                    return Some(Sample::new(cluster.median_radius(), sin_theta));
                }
            }
        }

        None
    }
}
