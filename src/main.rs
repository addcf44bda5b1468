//! # procar - VASP PROCAR 查看工具
//!
//! 解析 PROCAR 并以表格形式查看其中的 k 点、能带与离子投影权重。
//!
//! ## 子命令
//! - `info`  - 文件头计数与 k 点列表
//! - `bands` - 某 k 点的能带
//! - `ions`  - 某张离子表（可导出 CSV）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── procar (库: parsers/, models/, error.rs)
//!   └── utils/      (工具函数)
//! ```

mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = cli.parse.options();
    if let Err(e) = commands::run(cli.command, &options) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
