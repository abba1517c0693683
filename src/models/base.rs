//! # 基底配置数据模型
//!
//! 描述标定所用的基底：金属种类与表面取向。
//! 晶格常数在编译期固定为枚举匹配表。
//!
//! ## 依赖关系
//! - 被 `rprime/lattice.rs`, `rprime/pipeline.rs`, `cli/calibrate.rs` 使用

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 基底金属种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Kind {
    Au,
    Ag,
    Cu,
}

impl Kind {
    /// 晶格常数 (Å)
    pub fn lattice_constant(&self) -> f64 {
        match self {
            Kind::Cu => 3.61496,
            Kind::Ag => 4.0862,
            Kind::Au => 4.07864,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Au => write!(f, "Au"),
            Kind::Ag => write!(f, "Ag"),
            Kind::Cu => write!(f, "Cu"),
        }
    }
}

/// 基底表面取向
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Surface {
    /// fcc(110) surface
    #[value(name = "110")]
    S110,
    /// fcc(111) surface
    #[value(name = "111")]
    S111,
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Surface::S110 => write!(f, "110"),
            Surface::S111 => write!(f, "111"),
        }
    }
}

/// 基底配置：金属种类 + 表面取向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseType {
    /// 金属种类
    pub kind: Kind,
    /// 表面取向
    pub surface: Surface,
}

impl BaseType {
    pub fn new(kind: Kind, surface: Surface) -> Self {
        BaseType { kind, surface }
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.surface)
    }
}

/// 基准角作用域（110 表面的衍射级次判定）
///
/// `PerImage` 在每幅图像前重置基准角，每幅图像的首簇即其自身基准；
/// `PerRun` 让基准角在整个标定过程中持续累积。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BaselineScope {
    /// Reset the reference angles before every image
    #[default]
    PerImage,
    /// Keep the reference angles for the whole calibration run
    PerRun,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_constants() {
        assert!((Kind::Cu.lattice_constant() - 3.61496).abs() < 1e-12);
        assert!((Kind::Ag.lattice_constant() - 4.0862).abs() < 1e-12);
        assert!((Kind::Au.lattice_constant() - 4.07864).abs() < 1e-12);
    }

    #[test]
    fn test_base_type_display() {
        let base = BaseType::new(Kind::Au, Surface::S110);
        assert_eq!(base.to_string(), "Au(110)");
        assert_eq!(BaseType::new(Kind::Cu, Surface::S111).to_string(), "Cu(111)");
    }
}
