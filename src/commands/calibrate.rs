//! # calibrate 子命令实现
//!
//! 驱动完整标定流程：装载电压表 → 逐图像检测与汇入 →
//! 两遍拟合 → 终端报告，可选散点图与样本导出。
//!
//! ## 依赖关系
//! - 使用 `cli/calibrate.rs` 定义的 CalibrateArgs
//! - 使用 `parsers/` 装载输入
//! - 使用 `rprime/` 执行标定
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::calibrate::CalibrateArgs;
use crate::error::{LeedcalError, Result};
use crate::models::BaseType;
use crate::parsers::{self, Detector, ImageVoltage, SpotFileDetector};
use crate::rprime::{export, plot, CalibrationRun, ImageOutcome};
use crate::utils::{output, progress};

use std::collections::HashSet;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use walkdir::WalkDir;

/// 逐图像结果表格行
#[derive(Debug, Clone, Tabled)]
struct ImageRow {
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Voltage (V)")]
    voltage: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "X'")]
    x: String,
    #[tabled(rename = "sinθ")]
    sin_theta: String,
}

/// 执行标定
pub fn execute(args: CalibrateArgs) -> Result<()> {
    output::print_header("LEED r' Calibration");

    if !args.input_images_dir.is_dir() {
        return Err(LeedcalError::DirectoryNotFound {
            path: args.input_images_dir.display().to_string(),
        });
    }
    if args.isplot && args.output_image_path.is_none() {
        return Err(LeedcalError::InvalidArgument(
            "--isplot requires --output-image-path".to_string(),
        ));
    }

    let base = BaseType::new(args.kind, args.surface);
    output::print_info(&format!("Base type: {}", base));

    let entries =
        parsers::load_image_voltages(&args.input_images_dir, &args.input_voltages_path)?;
    output::print_info(&format!(
        "Loaded {} image/voltage entries from '{}'",
        entries.len(),
        args.input_voltages_path.display()
    ));
    warn_stray_sidecars(&args.input_images_dir, &entries);

    // 逐图像检测并汇入标定上下文
    let detector = SpotFileDetector::new();
    let mut run = CalibrationRun::new(base, args.baseline_scope);
    let mut table_rows = Vec::new();

    let pb = progress::create_progress_bar(entries.len() as u64, "Calibrating");
    for entry in &entries {
        let detection = detector.detect(&entry.path)?;
        let outcome = run.ingest(detection.as_ref(), entry.voltage);
        table_rows.push(image_row(entry, outcome));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !table_rows.is_empty() {
        println!("{}", Table::new(&table_rows));
    }

    let stats = *run.stats();
    output::print_separator();
    output::print_info(&format!(
        "{} sampled, {} no detection, {} no valid cluster, {} no matching order",
        stats.sampled, stats.no_detection, stats.no_cluster, stats.no_order
    ));

    // 样本不足在这里升级为致命错误
    let calibration = run.finish()?;

    output::print_success(&format!(
        "Fitted r' = {:.4} (intercept = {:.4})",
        calibration.fit.rprime, calibration.fit.intercept
    ));

    if let Some(ref csv_path) = args.output_csv_path {
        export::samples_to_csv(&calibration.samples, csv_path)?;
        output::print_success(&format!("Samples saved to '{}'", csv_path.display()));
    }

    if let (true, Some(image_path)) = (args.isplot, args.output_image_path.as_ref()) {
        plot::generate_scatter_plot(
            &calibration.samples,
            &calibration.fit,
            base,
            args.manual_r,
            image_path,
            args.width,
            args.height,
        )?;
        output::print_success(&format!("Figure saved to '{}'", image_path.display()));
    }

    println!("r: {}", calibration.fit.rprime);

    Ok(())
}

/// 提醒目录里未被电压表引用的光斑文件
fn warn_stray_sidecars(images_dir: &PathBuf, entries: &[ImageVoltage]) {
    let referenced: HashSet<PathBuf> = entries
        .iter()
        .map(|e| SpotFileDetector::sidecar_path(&e.path))
        .collect();

    let stray = WalkDir::new(images_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "csv"))
        .filter(|e| !referenced.contains(e.path()))
        .count();

    if stray > 0 {
        output::print_warning(&format!(
            "{} spot-vector file(s) in '{}' are not referenced by the voltage table",
            stray,
            images_dir.display()
        ));
    }
}

fn image_row(entry: &ImageVoltage, outcome: ImageOutcome) -> ImageRow {
    let (x, sin_theta) = match outcome {
        ImageOutcome::Sampled(sample) => {
            (format!("{:.2}", sample.x), format!("{:.4}", sample.sin_theta))
        }
        _ => ("-".to_string(), "-".to_string()),
    };

    ImageRow {
        image: entry.image.clone(),
        voltage: format!("{:.1}", entry.voltage),
        outcome: outcome.to_string(),
        x,
        sin_theta,
    }
}
