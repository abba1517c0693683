//! # 标定管线编排
//!
//! 逐图像执行 极坐标转换 → 聚类 → 级次解析，累计样本后做两遍拟合。
//! 运行状态（样本序列、基准角、逐图像统计）集中在显式的
//! `CalibrationRun` 上下文中。
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 驱动
//! - 使用 `rprime/{polar,cluster,lattice,fit}.rs`
//! - 使用 `parsers/spots.rs` 的 Detector、`parsers/voltages.rs` 的 ImageVoltage

use crate::error::{LeedcalError, Result};
use crate::models::{BaseType, BaselineScope, Sample, SpotVectorSet};
use crate::parsers::{Detector, ImageVoltage};
use crate::rprime::cluster::ClusterBuilder;
use crate::rprime::fit::{self, LineFit};
use crate::rprime::lattice::{LatticeModel, ThetaBaseline};
use crate::rprime::polar;

/// 单幅图像的处理结果；三种跳过情形均不是错误
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageOutcome {
    /// 产出一个样本
    Sampled(Sample),
    /// 未检测到光斑
    NoDetection,
    /// 无角对称簇
    NoValidCluster,
    /// 无簇通过级次判定
    NoMatchingOrder,
}

impl std::fmt::Display for ImageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageOutcome::Sampled(_) => write!(f, "sampled"),
            ImageOutcome::NoDetection => write!(f, "no detection"),
            ImageOutcome::NoValidCluster => write!(f, "no valid cluster"),
            ImageOutcome::NoMatchingOrder => write!(f, "no matching order"),
        }
    }
}

/// 逐图像结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// 产出样本的图像数
    pub sampled: usize,
    /// 未检测到光斑的图像数
    pub no_detection: usize,
    /// 无有效簇的图像数
    pub no_cluster: usize,
    /// 级次判定失败的图像数
    pub no_order: usize,
}

impl RunStats {
    fn record(&mut self, outcome: ImageOutcome) {
        match outcome {
            ImageOutcome::Sampled(_) => self.sampled += 1,
            ImageOutcome::NoDetection => self.no_detection += 1,
            ImageOutcome::NoValidCluster => self.no_cluster += 1,
            ImageOutcome::NoMatchingOrder => self.no_order += 1,
        }
    }

    /// 处理的图像总数
    pub fn total(&self) -> usize {
        self.sampled + self.no_detection + self.no_cluster + self.no_order
    }
}

/// 完整的标定结果
#[derive(Debug, Clone)]
pub struct Calibration {
    /// 拟合直线，斜率即 r'
    pub fit: LineFit,
    /// 全部样本（头部为合成零点）
    pub samples: Vec<Sample>,
    /// 逐图像统计
    pub stats: RunStats,
}

/// 标定运行上下文
///
/// 样本序列以合成零点 (0, 0) 开头；基准角按配置的作用域
/// 在图像间重置或持续。
pub struct CalibrationRun {
    model: LatticeModel,
    builder: ClusterBuilder,
    scope: BaselineScope,
    baseline: ThetaBaseline,
    samples: Vec<Sample>,
    stats: RunStats,
}

impl CalibrationRun {
    pub fn new(base: BaseType, scope: BaselineScope) -> Self {
        CalibrationRun {
            model: LatticeModel::new(base),
            builder: ClusterBuilder::new(),
            scope,
            baseline: ThetaBaseline::new(),
            samples: vec![Sample::seed()],
            stats: RunStats::default(),
        }
    }

    /// 已累计的样本（含合成零点）
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// 处理一幅图像的检测结果；任何跳过情形都不贡献样本
    pub fn ingest(&mut self, detection: Option<&SpotVectorSet>, voltage: f64) -> ImageOutcome {
        let outcome = self.evaluate(detection, voltage);
        self.stats.record(outcome);
        if let ImageOutcome::Sampled(sample) = outcome {
            self.samples.push(sample);
        }
        outcome
    }

    fn evaluate(&mut self, detection: Option<&SpotVectorSet>, voltage: f64) -> ImageOutcome {
        let vectors = match detection {
            Some(v) => v,
            None => return ImageOutcome::NoDetection,
        };

        if self.scope == BaselineScope::PerImage {
            self.baseline.reset();
        }

        let points = polar::to_polar(vectors);
        let clusters = match self.builder.build(&points) {
            Some(c) => c,
            None => return ImageOutcome::NoValidCluster,
        };

        match self
            .model
            .resolve_sample(voltage, &clusters, &mut self.baseline)
        {
            Some(sample) => ImageOutcome::Sampled(sample),
            None => ImageOutcome::NoMatchingOrder,
        }
    }

    /// 收尾：样本不足则报 InsufficientFitData，否则拟合并返回结果
    pub fn finish(self) -> Result<Calibration> {
        let usable = self.samples.len() - 1;
        if usable < 2 {
            return Err(LeedcalError::InsufficientFitData { samples: usable });
        }

        let fit = fit::fit_samples(&self.samples)?;
        Ok(Calibration {
            fit,
            samples: self.samples,
            stats: self.stats,
        })
    }

    /// 便捷循环：逐条检测并汇入，最后收尾
    pub fn run<D: Detector>(mut self, detector: &D, entries: &[ImageVoltage]) -> Result<Calibration> {
        for entry in entries {
            let detection = detector.detect(&entry.path)?;
            self.ingest(detection.as_ref(), entry.voltage);
        }
        self.finish()
    }
}
