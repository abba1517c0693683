//! # 光斑向量输入
//!
//! 光斑检测的接口边界与文件后端实现。图像本身的处理
//! （阈值化、轮廓提取）由上游阶段完成，这里只装载其导出结果。
//!
//! ## 格式说明
//! 每幅图像对应一个同名 `.csv` 边车文件，逐行 `dx,dy` 位移向量：
//! ```text
//! dx,dy                # 表头可省略
//! 120.5,-80.2
//! -119.8,81.0
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs`, `rprime/pipeline.rs` 使用
//! - 使用 `models/spot.rs`
//! - 使用 `csv` 库读取

use crate::error::{LeedcalError, Result};
use crate::models::{SpotVector, SpotVectorSet};

use std::path::{Path, PathBuf};

/// 光斑检测接口：每幅图像产出一组位移向量，或什么都没有
pub trait Detector {
    /// `Ok(None)` 表示该图像未检测到光斑，图像被跳过
    fn detect(&self, image_path: &Path) -> Result<Option<SpotVectorSet>>;
}

/// 文件后端检测器：读取图像旁的 `.csv` 边车文件
#[derive(Debug, Default)]
pub struct SpotFileDetector;

impl SpotFileDetector {
    pub fn new() -> Self {
        SpotFileDetector
    }

    /// 图像路径 → 边车文件路径（扩展名替换为 csv）
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        image_path.with_extension("csv")
    }
}

impl Detector for SpotFileDetector {
    fn detect(&self, image_path: &Path) -> Result<Option<SpotVectorSet>> {
        let path = Self::sidecar_path(image_path);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&path)?;

        let mut vectors = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() < 2 {
                return Err(LeedcalError::ParseError {
                    format: "spots".to_string(),
                    path: path.display().to_string(),
                    reason: format!("Expected 'dx,dy' columns at line {}", idx + 1),
                });
            }

            match (record[0].parse::<f64>(), record[1].parse::<f64>()) {
                (Ok(dx), Ok(dy)) => vectors.push(SpotVector::new(dx, dy)),
                // 首行允许是表头
                _ if idx == 0 => continue,
                _ => {
                    return Err(LeedcalError::ParseError {
                        format: "spots".to_string(),
                        path: path.display().to_string(),
                        reason: format!(
                            "Invalid vector '{},{}' at line {}",
                            &record[0],
                            &record[1],
                            idx + 1
                        ),
                    })
                }
            }
        }

        Ok(if vectors.is_empty() {
            None
        } else {
            Some(vectors)
        })
    }
}
