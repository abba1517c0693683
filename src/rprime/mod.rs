//! # r′ 标定核心模块
//!
//! 从逐图像光斑向量到标定常数 r′ 的几何聚类与拟合管线。
//!
//! ## 子模块
//! - `polar`: 光斑向量 → 极坐标
//! - `cluster`: 角对称半径聚类
//! - `lattice`: 基底几何与衍射级次解析
//! - `fit`: 两遍最小二乘拟合（含离群点剔除）
//! - `pipeline`: 逐图像编排与运行上下文
//! - `plot`: sinθ–X′ 散点图
//! - `export`: 样本数据导出
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 使用
//! - 使用 `models/`

pub mod cluster;
pub mod export;
pub mod fit;
pub mod lattice;
pub mod pipeline;
pub mod plot;
pub mod polar;

pub use cluster::{Cluster, ClusterBuilder};
pub use fit::LineFit;
pub use lattice::ThetaBaseline;
pub use pipeline::{Calibration, CalibrationRun, ImageOutcome, RunStats};
