//! # 样本数据导出
//!
//! 将累计的 (sinθ, X′) 样本写出为 CSV，便于后续分析。
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{LeedcalError, Result};
use crate::models::Sample;

use std::path::Path;

/// 导出样本序列为 CSV（含头部合成零点）
pub fn samples_to_csv(samples: &[Sample], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["sintheta", "x"])?;
    for sample in samples {
        wtr.write_record([
            format!("{:.6}", sample.sin_theta),
            format!("{:.4}", sample.x),
        ])?;
    }

    wtr.flush().map_err(|e| LeedcalError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
