//! # 极坐标转换
//!
//! 将光斑位移向量转换为 (半径, 角度) 对，角度归一化到 [0, 2π)。
//!
//! ## 依赖关系
//! - 被 `rprime/pipeline.rs` 调用
//! - 使用 `models/spot.rs`

use crate::models::SpotVectorSet;

use std::f64::consts::PI;

/// 极坐标点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// 向量模长（像素）
    pub radius: f64,
    /// 平面角，[0, 2π)
    pub theta: f64,
}

/// 光斑向量集 → 极坐标点列，逐向量一一对应
pub fn to_polar(vectors: &SpotVectorSet) -> Vec<PolarPoint> {
    vectors
        .iter()
        .map(|v| {
            let radius = v.dx.hypot(v.dy);
            let mut theta = v.dy.atan2(v.dx);
            if theta < 0.0 {
                theta += 2.0 * PI;
            }
            PolarPoint { radius, theta }
        })
        .collect()
}
