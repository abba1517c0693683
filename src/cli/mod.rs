//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calibrate`: 从电压序列图像估计标定常数 r'
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: calibrate

pub mod calibrate;

use clap::{Parser, Subcommand};

/// leedcal - LEED 仪器标定工具箱
#[derive(Parser)]
#[command(name = "leedcal")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A LEED instrument calibration toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the calibration constant r' from a beam-voltage image series
    Calibrate(calibrate::CalibrateArgs),
}
