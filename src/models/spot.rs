//! # 光斑向量数据模型
//!
//! 一幅 LEED 图像中检测到的亮斑相对光束轴的平面位移向量。
//! 由上游检测阶段产生，核心管线只读取一次。
//!
//! ## 依赖关系
//! - 被 `parsers/spots.rs`, `rprime/polar.rs` 使用

use serde::{Deserialize, Serialize};

/// 单个光斑的位移向量（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotVector {
    /// 水平分量
    pub dx: f64,
    /// 垂直分量
    pub dy: f64,
}

impl SpotVector {
    pub fn new(dx: f64, dy: f64) -> Self {
        SpotVector { dx, dy }
    }
}

/// 一幅图像的全部光斑向量（保持检测顺序）
pub type SpotVectorSet = Vec<SpotVector>;
