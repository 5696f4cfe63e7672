mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志系统
    portfolio_probe::logger::init_logger();

    let cli = Cli::parse();
    cli::run(cli).await
}
