//! # 数据模型模块
//!
//! 定义基底配置、光斑向量与标定样本的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `rprime/`, `commands/` 使用
//! - 子模块: base, spot, sample

pub mod base;
pub mod sample;
pub mod spot;

pub use base::{BaseType, BaselineScope, Kind, Surface};
pub use sample::Sample;
pub use spot::{SpotVector, SpotVectorSet};
