//! # leedcal - LEED 仪器标定工具箱
//!
//! 从不同束电压下拍摄的 LEED 图像系列估计仪器标定常数 r'。
//!
//! ## 子命令
//! - `calibrate` - 逐图像聚类、解析衍射级次并拟合 r'
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (电压表与光斑向量装载)
//!   │     └── rprime/    (聚类 + 级次解析 + 拟合核心)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod rprime;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
