//! # 标定样本数据模型
//!
//! 每幅有效图像贡献一个 (x, sinθ) 样本；全部样本串接后交给线性拟合。
//!
//! ## 依赖关系
//! - 被 `rprime/lattice.rs`, `rprime/fit.rs`, `rprime/pipeline.rs` 使用

use serde::{Deserialize, Serialize};

/// 单个标定样本
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 光斑位移 X'（像素，簇半径的中位数）
    pub x: f64,
    /// 衍射角正弦
    pub sin_theta: f64,
}

impl Sample {
    pub fn new(x: f64, sin_theta: f64) -> Self {
        Sample { x, sin_theta }
    }

    /// 样本序列头部的合成零点：零衍射角对应零位移
    pub fn seed() -> Self {
        Sample {
            x: 0.0,
            sin_theta: 0.0,
        }
    }
}
