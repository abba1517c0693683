//! # 电压表解析器
//!
//! 解析 `图像文件名, 束电压` 两列 CSV，并与图像目录做文件名拼接。
//!
//! ## 格式说明
//! ```text
//! image,voltage        # 表头可省略
//! leed_075.png,75
//! leed_150.png,150
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 使用
//! - 使用 `csv` 库读取

use crate::error::{LeedcalError, Result};

use std::path::{Path, PathBuf};

/// 电压表中的一行：图像与其拍摄电压
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVoltage {
    /// 图像文件名（表中原文）
    pub image: String,
    /// 与图像目录拼接后的完整路径
    pub path: PathBuf,
    /// 束电压 (V)
    pub voltage: f64,
}

/// 读取电压表并与图像目录拼接，保持表中行序
pub fn load_image_voltages(images_dir: &Path, voltages_path: &Path) -> Result<Vec<ImageVoltage>> {
    if !voltages_path.exists() {
        return Err(LeedcalError::FileNotFound {
            path: voltages_path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(voltages_path)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 2 {
            return Err(LeedcalError::ParseError {
                format: "voltages".to_string(),
                path: voltages_path.display().to_string(),
                reason: format!("Expected 'image,voltage' columns at line {}", idx + 1),
            });
        }

        let image = record[0].to_string();
        match record[1].parse::<f64>() {
            Ok(voltage) if voltage > 0.0 => rows.push(ImageVoltage {
                path: images_dir.join(&image),
                image,
                voltage,
            }),
            Ok(voltage) => {
                return Err(LeedcalError::ParseError {
                    format: "voltages".to_string(),
                    path: voltages_path.display().to_string(),
                    reason: format!("Voltage must be positive, got {} at line {}", voltage, idx + 1),
                })
            }
            // 首行允许是表头
            Err(_) if idx == 0 => continue,
            Err(_) => {
                return Err(LeedcalError::ParseError {
                    format: "voltages".to_string(),
                    path: voltages_path.display().to_string(),
                    reason: format!("Invalid voltage '{}' at line {}", &record[1], idx + 1),
                })
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("leedcal_{}_{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_with_header() {
        let path = write_temp("volt_header.csv", "image,voltage\na.png,75\nb.png,150.5\n");
        let rows = load_image_voltages(Path::new("/data/images"), &path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].image, "a.png");
        assert_eq!(rows[0].path, Path::new("/data/images").join("a.png"));
        assert!((rows[0].voltage - 75.0).abs() < 1e-12);
        assert!((rows[1].voltage - 150.5).abs() < 1e-12);
    }

    #[test]
    fn test_load_without_header() {
        let path = write_temp("volt_plain.csv", "a.png,75\nb.png,150\nc.png,300\n");
        let rows = load_image_voltages(Path::new("images"), &path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 3);
        assert!((rows[2].voltage - 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_voltage_rejected() {
        let path = write_temp("volt_bad.csv", "a.png,75\nb.png,abc\n");
        let err = load_image_voltages(Path::new("images"), &path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, LeedcalError::ParseError { .. }));

        let path = write_temp("volt_neg.csv", "a.png,-50\n");
        let err = load_image_voltages(Path::new("images"), &path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, LeedcalError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err =
            load_image_voltages(Path::new("images"), Path::new("/no/such/voltages.csv")).unwrap_err();
        assert!(matches!(err, LeedcalError::FileNotFound { .. }));
    }
}
