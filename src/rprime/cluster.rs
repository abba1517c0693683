//! # 角对称半径聚类
//!
//! 将一幅图像的光斑半径按直方图分箱聚成候选衍射环，
//! 仅保留存在角对置光斑对（角差 ≈ π）的簇。
//!
//! ## 算法概述
//! 1. 半径在 [0, 500] 上做 100 箱直方图
//! 2. 非空箱按升序遍历，箱起点超过前箱起点 + 10 时开启新簇
//! 3. 簇成员从原始半径中按 [首箱起点, 末箱起点 + 10] 范围重选
//! 4. 丢弃成员数 ≤ 1 的簇
//! 5. 按字典序枚举角度二元组合做对置检验，命中的簇其角度集
//!    坍缩为最后一个命中的组合
//!
//! ## 依赖关系
//! - 被 `rprime/pipeline.rs` 调用
//! - 使用 `rprime/polar.rs` 的 PolarPoint

use crate::rprime::polar::PolarPoint;

use std::f64::consts::PI;

/// 直方图箱数
const HIST_BINS: usize = 100;
/// 直方图半径上限（像素）
const HIST_RANGE: f64 = 500.0;
/// 相邻箱合并阈值（像素）
const MERGE_GAP: f64 = 10.0;
/// 角对置容差（弧度）
const OPPOSITION_TOL: f64 = 0.1;

/// 候选衍射环：半径集与等长的角度集
///
/// 通过对置检验后，`thetas` 恰为命中的角度对。
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// 簇内全部光斑半径
    pub radii: Vec<f64>,
    /// 对应角度
    pub thetas: Vec<f64>,
}

impl Cluster {
    /// 半径中位数，作为样本的 X' 值
    pub fn median_radius(&self) -> f64 {
        median(&self.radii)
    }

    /// 最小角度，衍射级次判定的匹配键
    pub fn min_theta(&self) -> f64 {
        self.thetas.iter().cloned().fold(f64::INFINITY, f64::min)
    }
}

/// 聚类构建器
#[derive(Debug, Default)]
pub struct ClusterBuilder;

impl ClusterBuilder {
    pub fn new() -> Self {
        ClusterBuilder
    }

    /// 聚类并做角对称校验；没有任何有效簇时返回 None
    pub fn build(&self, points: &[PolarPoint]) -> Option<Vec<Cluster>> {
        let bin_freqs = radius_histogram(points);

        // 沿非空箱游走切分候选簇
        let mut candidates: Vec<Cluster> = Vec::new();
        let mut prev_bin = 0.0;
        let mut start = 0.0;
        for (j, &(current_bin, _)) in bin_freqs.iter().enumerate() {
            if current_bin > prev_bin + MERGE_GAP || j == bin_freqs.len() - 1 {
                // 首箱只负责开启第一个簇；末箱以自身为范围终点，
                // 因此尾部的箱总被并入最后一个簇
                if j != 0 {
                    let end = if j == bin_freqs.len() - 1 {
                        current_bin
                    } else {
                        bin_freqs[j - 1].0
                    };
                    let members: Vec<&PolarPoint> = points
                        .iter()
                        .filter(|p| p.radius >= start && p.radius <= end + MERGE_GAP)
                        .collect();
                    if members.len() > 1 {
                        candidates.push(Cluster {
                            radii: members.iter().map(|p| p.radius).collect(),
                            thetas: members.iter().map(|p| p.theta).collect(),
                        });
                    }
                }
                start = current_bin;
            }
            prev_bin = current_bin;
        }

        // 角对置校验：最后一个命中的组合覆盖之前的命中
        let mut clusters = Vec::new();
        for mut cluster in candidates {
            let mut matched_pair = None;
            for i in 0..cluster.thetas.len() {
                for k in (i + 1)..cluster.thetas.len() {
                    let error = PI - (cluster.thetas[i] - cluster.thetas[k]).abs();
                    if error.abs() < OPPOSITION_TOL {
                        matched_pair = Some((cluster.thetas[i], cluster.thetas[k]));
                    }
                }
            }
            if let Some((t1, t2)) = matched_pair {
                cluster.thetas = vec![t1, t2];
                clusters.push(cluster);
            }
        }

        if clusters.is_empty() {
            None
        } else {
            Some(clusters)
        }
    }
}

/// 非空直方图箱列表: (箱起点, 计数)，按箱起点升序
fn radius_histogram(points: &[PolarPoint]) -> Vec<(f64, usize)> {
    let bin_width = HIST_RANGE / HIST_BINS as f64;
    let mut freq = [0usize; HIST_BINS];

    for p in points {
        if p.radius < 0.0 || p.radius > HIST_RANGE {
            continue;
        }
        // 半径恰为上限时落入最后一箱
        let idx = ((p.radius / bin_width) as usize).min(HIST_BINS - 1);
        freq[idx] += 1;
    }

    freq.iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(j, &count)| (j as f64 * bin_width, count))
        .collect()
}

/// 中位数；偶数长度取中间两数均值
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(radius: f64, theta: f64) -> PolarPoint {
        PolarPoint { radius, theta }
    }

    /// 一个衍射环：对置光斑对，半径拆入相邻两箱以便成簇
    fn ring(r_lo: f64, r_hi: f64, theta: f64) -> Vec<PolarPoint> {
        vec![point(r_lo, theta), point(r_hi, theta + PI)]
    }

    #[test]
    fn test_opposite_pair_retained() {
        let builder = ClusterBuilder::new();
        let clusters = builder.build(&ring(100.0, 106.0, 0.5)).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].radii, vec![100.0, 106.0]);
        assert_eq!(clusters[0].thetas.len(), 2);
        assert!((clusters[0].min_theta() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_opposition_tolerance() {
        let builder = ClusterBuilder::new();

        // π ± 0.05 在容差内
        let near = vec![point(100.0, 0.5), point(106.0, 0.5 + PI + 0.05)];
        assert!(builder.build(&near).is_some());
        let near = vec![point(100.0, 0.5), point(106.0, 0.5 + PI - 0.05)];
        assert!(builder.build(&near).is_some());

        // π ± 0.2 超出容差
        let far = vec![point(100.0, 0.5), point(106.0, 0.5 + PI + 0.2)];
        assert!(builder.build(&far).is_none());
        let far = vec![point(100.0, 0.5), point(106.0, 0.5 + PI - 0.2)];
        assert!(builder.build(&far).is_none());
    }

    #[test]
    fn test_singleton_group_discarded() {
        let builder = ClusterBuilder::new();

        // 孤立箱夹在两个有效环之前，对置角也救不回来
        let mut points = vec![point(50.0, 1.0)];
        points.extend(ring(200.0, 206.0, 0.3));
        points.extend(ring(400.0, 406.0, 1.2));

        let clusters = builder.build(&points).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].radii, vec![200.0, 206.0]);
        assert_eq!(clusters[1].radii, vec![400.0, 406.0]);
    }

    #[test]
    fn test_lone_bin_never_clusters() {
        let builder = ClusterBuilder::new();
        // 全部半径落入同一箱：游走在首箱即结束，不产生簇
        let points = vec![point(100.0, 0.5), point(101.0, 0.5 + PI)];
        assert!(builder.build(&points).is_none());
    }

    #[test]
    fn test_last_matching_pair_wins() {
        let builder = ClusterBuilder::new();
        // (θa, θb) 与 (θa, θc) 均命中，保留字典序靠后的 (θa, θc)
        let ta = 0.3;
        let tb = 0.3 + PI;
        let tc = 0.3 + PI + 0.04;
        let points = vec![point(100.0, ta), point(103.0, tb), point(107.0, tc)];

        let clusters = builder.build(&points).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].thetas, vec![ta, tc]);
        // 半径集不坍缩
        assert_eq!(clusters[0].radii.len(), 3);
    }

    #[test]
    fn test_trailing_bin_merges_into_final_cluster() {
        let builder = ClusterBuilder::new();
        // 末箱同时触发间隔切分时，范围终点取末箱自身，
        // 远处的环被并入同一个簇
        let mut points = ring(100.0, 106.0, 0.5);
        points.push(point(300.0, 1.0));
        points.push(point(301.0, 1.0 + PI));

        let clusters = builder.build(&points).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].radii.len(), 4);
        // 两对角对均命中，保留靠后的那对
        assert_eq!(clusters[0].thetas, vec![1.0, 1.0 + PI]);
    }

    #[test]
    fn test_median() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < 1e-12);
        assert!(median(&[]).is_nan());
    }
}
