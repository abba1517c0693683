//! # 标定散点图
//!
//! 使用 `plotters` 绘制 sinθ–X′ 散点图并叠加拟合直线。
//!
//! ## 功能
//! - 固定坐标范围 sinθ ∈ [0, 0.6]、X′ ∈ [0, 500]
//! - 标题为基底配置（如 Au(110)）
//! - 图例展示拟合 r'，可附带人工测量值
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 调用
//! - 使用 `rprime/fit.rs` 的 LineFit、`models/sample.rs` 的 Sample
//! - 使用 `plotters` 渲染图表

use crate::error::{LeedcalError, Result};
use crate::models::{BaseType, Sample};
use crate::rprime::fit::LineFit;

use plotters::prelude::*;
use std::path::Path;

/// sinθ 轴上限
const SINTHETA_MAX: f64 = 0.6;
/// X′ 轴上限（像素）
const X_MAX: f64 = 500.0;

/// 绘制标定散点图 (PNG)
pub fn generate_scatter_plot(
    samples: &[Sample],
    fit: &LineFit,
    base: BaseType,
    manual_r: Option<f64>,
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();

    root.fill(&WHITE)
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(base.to_string(), ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..SINTHETA_MAX, 0.0..X_MAX)
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("sinθ")
        .y_desc("X'")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?;

    let point_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            samples
                .iter()
                .map(|s| Circle::new((s.sin_theta, s.x), 4, point_color.filled())),
        )
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?;

    // 拟合线按 x(s) = r'·s/√(1−s²) + b 沿 sinθ 轴取值
    let label = match manual_r {
        Some(manual) => format!("r={:.2}, manual_r={}", fit.rprime, manual),
        None => format!("r={:.2}", fit.rprime),
    };
    let line_color = RGBColor(204, 51, 0);
    let fit_line = (0..=120).map(|i| {
        let s = SINTHETA_MAX * i as f64 / 120.0;
        let u = s / (1.0 - s * s).sqrt();
        (s, fit.rprime * u + fit.intercept)
    });
    chart
        .draw_series(LineSeries::new(
            fit_line.filter(|(_, x)| (0.0..=X_MAX).contains(x)),
            line_color.stroke_width(2),
        ))
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?
        .label(label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| LeedcalError::PlotError(format!("{:?}", e)))?;

    root.present()
        .map_err(|e| LeedcalError::PlotError(e.to_string()))?;

    Ok(())
}
