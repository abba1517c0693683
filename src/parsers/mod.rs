//! # 输入解析模块
//!
//! 解析电压表 CSV 与上游检测阶段导出的光斑向量 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs`, `rprime/pipeline.rs` 使用
//! - 子模块: spots, voltages

pub mod spots;
pub mod voltages;

pub use spots::{Detector, SpotFileDetector};
pub use voltages::{load_image_voltages, ImageVoltage};
