//! # 两遍最小二乘拟合
//!
//! 对累计样本按 x = r'·u + b（u = sinθ/√(1−sin²θ)）拟合直线，
//! 第一遍拟合后剔除残差超过 50 的离群样本，再补入合成零点重拟合。
//!
//! ## 依赖关系
//! - 被 `rprime/pipeline.rs` 调用
//! - 使用 `models/sample.rs`

use crate::error::{LeedcalError, Result};
use crate::models::Sample;

/// 离群判定的残差上限（像素）
const OUTLIER_LIMIT: f64 = 50.0;

/// 拟合结果：斜率即标定常数 r'
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// 标定常数 r'
    pub rprime: f64,
    /// 截距
    pub intercept: f64,
}

impl LineFit {
    /// 线上取值 x(u)
    fn value_at(&self, u: f64) -> f64 {
        self.rprime * u + self.intercept
    }
}

/// 线性化变量 u = sinθ/√(1−sin²θ)
fn linearize(sin_theta: f64) -> f64 {
    sin_theta / (1.0 - sin_theta * sin_theta).sqrt()
}

/// 两遍拟合：粗拟合 → 剔除离群点 → 头部补零点 → 重拟合
pub fn fit_samples(samples: &[Sample]) -> Result<LineFit> {
    let us: Vec<f64> = samples.iter().map(|s| linearize(s.sin_theta)).collect();
    let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();

    let first = least_squares(&us, &xs)?;

    // 零点总是补回头部，即使它曾被标记为离群
    let mut kept_u = vec![0.0];
    let mut kept_x = vec![0.0];
    for (&u, &x) in us.iter().zip(&xs) {
        if (first.value_at(u) - x).abs() <= OUTLIER_LIMIT {
            kept_u.push(u);
            kept_x.push(x);
        }
    }

    least_squares(&kept_u, &kept_x)
}

/// 一元最小二乘；横坐标不足两个互异值时报 InsufficientFitData
fn least_squares(us: &[f64], xs: &[f64]) -> Result<LineFit> {
    let n = us.len();
    if n < 2 {
        return Err(LeedcalError::InsufficientFitData { samples: n });
    }

    let mean_u = us.iter().sum::<f64>() / n as f64;
    let mean_x = xs.iter().sum::<f64>() / n as f64;

    let mut s_uu = 0.0;
    let mut s_ux = 0.0;
    for (&u, &x) in us.iter().zip(xs) {
        s_uu += (u - mean_u) * (u - mean_u);
        s_ux += (u - mean_u) * (x - mean_x);
    }

    if s_uu.abs() < f64::EPSILON {
        return Err(LeedcalError::InsufficientFitData { samples: n });
    }

    let rprime = s_ux / s_uu;
    Ok(LineFit {
        rprime,
        intercept: mean_x - rprime * mean_u,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 由 u 反推 sinθ 构造样本：s = u/√(1+u²)
    fn sample_at(u: f64, x: f64) -> Sample {
        Sample::new(x, u / (1.0 + u * u).sqrt())
    }

    #[test]
    fn test_linearize_roundtrip() {
        for u in [0.0f64, 0.3, 1.0, 2.5] {
            let s = u / (1.0 + u * u).sqrt();
            assert!((linearize(s) - u).abs() < 1e-12);
        }
    }

    #[test]
    fn test_perfect_line_recovered_without_removal() {
        let mut samples = vec![Sample::seed()];
        for u in [0.2, 0.5, 1.0, 1.5, 2.0] {
            samples.push(sample_at(u, 3.0 * u));
        }

        let fit = fit_samples(&samples).unwrap();
        assert!((fit.rprime - 3.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);

        // 无残差意味着第一遍结果与最终结果一致（零剔除）
        let us: Vec<f64> = samples.iter().map(|s| linearize(s.sin_theta)).collect();
        let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
        let first = least_squares(&us, &xs).unwrap();
        assert!((first.rprime - fit.rprime).abs() < 1e-9);
    }

    #[test]
    fn test_outlier_excluded_and_slope_improves() {
        let mut samples = vec![Sample::seed()];
        for u in [1.0, 2.0, 3.0, 4.0, 5.0] {
            samples.push(sample_at(u, 3.0 * u));
        }
        // 残差远超 50 的坏点
        samples.push(sample_at(1.0, 100.0));

        let us: Vec<f64> = samples.iter().map(|s| linearize(s.sin_theta)).collect();
        let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
        let first = least_squares(&us, &xs).unwrap();

        let fit = fit_samples(&samples).unwrap();
        assert!((fit.rprime - 3.0).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);
        assert!((fit.rprime - 3.0).abs() < (first.rprime - 3.0).abs());
    }

    #[test]
    fn test_insufficient_data() {
        let err = fit_samples(&[Sample::seed()]).unwrap_err();
        assert!(matches!(
            err,
            LeedcalError::InsufficientFitData { samples: 1 }
        ));

        // 横坐标全部相同也无法定义斜率
        let samples = vec![sample_at(1.0, 10.0), sample_at(1.0, 20.0)];
        assert!(matches!(
            fit_samples(&samples).unwrap_err(),
            LeedcalError::InsufficientFitData { .. }
        ));
    }
}
