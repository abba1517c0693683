//! # calibrate 子命令 CLI 定义
//!
//! 标定入口：输入图像目录与电压表，输出拟合得到的 r'。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calibrate.rs`
//! - 使用 `models/base.rs` 的 Kind/Surface/BaselineScope

use crate::models::{BaselineScope, Kind, Surface};

use clap::Args;
use std::path::PathBuf;

/// calibrate 子命令参数
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Input images directory (spot-vector sidecar CSVs live next to the images)
    #[arg(long)]
    pub input_images_dir: PathBuf,

    /// Input image/beam-voltage CSV file
    #[arg(long)]
    pub input_voltages_path: PathBuf,

    /// Base metal kind
    #[arg(long, value_enum)]
    pub kind: Kind,

    /// Base surface orientation
    #[arg(long, value_enum)]
    pub surface: Surface,

    /// Reference-angle scope for the 110 order resolution
    #[arg(long, value_enum, default_value = "per-image")]
    pub baseline_scope: BaselineScope,

    /// Draw a scatter plot of sinθ and X'
    #[arg(long, default_value_t = false)]
    pub isplot: bool,

    /// Output plot image path (PNG, required with --isplot)
    #[arg(long)]
    pub output_image_path: Option<PathBuf>,

    /// Output CSV path for the accumulated samples
    #[arg(long)]
    pub output_csv_path: Option<PathBuf>,

    /// Manually measured r, echoed in the plot legend
    #[arg(long)]
    pub manual_r: Option<f64>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
