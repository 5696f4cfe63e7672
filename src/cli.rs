use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use portfolio_probe::config::{ConfigLoader, Overrides, Settings};
use portfolio_probe::listing;
use portfolio_probe::report::RunReport;
use portfolio_probe::runner::{ProbeReporter, ProbeRunner, RunOptions};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 不写子命令时等同于 `run`
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 按顺序执行全部探针
    Run(RunArgs),
    /// 列出所有探针，不发请求
    List,
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    /// API base URL，例如 https://example.com/api 或 :8001/api
    #[arg(long)]
    pub base_url: Option<String>,

    /// 配置文件中的环境名
    #[arg(short, long)]
    pub env: Option<String>,

    /// 配置文件路径（默认自动查找 portfolio-probe.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 管理员邮箱
    #[arg(long)]
    pub email: Option<String>,

    /// 管理员密码
    #[arg(long)]
    pub password: Option<String>,

    /// 每个请求的超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,

    /// 跳过联系表单探针
    #[arg(long)]
    pub skip_contact: bool,

    /// 把结果以 JSON 写到该文件
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// 通过的探针也显示细节和耗时
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            admin_email: self.email.clone(),
            admin_password: self.password.clone(),
            timeout_secs: self.timeout,
        }
    }

    fn settings(&self) -> Result<Settings> {
        let config = match &self.config {
            Some(path) => Some(ConfigLoader::load_from_path(path)?),
            None => ConfigLoader::find_and_load()?,
        };
        Ok(Settings::resolve(
            config.as_ref(),
            self.env.as_deref(),
            &self.overrides(),
        )?)
    }
}

/// 执行命令，配置错误或报告写入失败同样以退出码 1 结束
pub async fn run(cli: Cli) -> ExitCode {
    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::List) => {
            listing::list_probes();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Run(args)) => run_probes(args).await,
        None => run_probes(cli.run).await,
    }
}

async fn run_probes(args: RunArgs) -> Result<ExitCode> {
    let settings = args.settings().context("failed to load settings")?;
    let options = RunOptions {
        skip_contact: args.skip_contact,
    };

    let started_at = Local::now();
    let mut runner = ProbeRunner::new(&settings, ProbeReporter::new(args.verbose))?;
    let summary = runner.run_all(&options).await;

    if let Some(path) = &args.report {
        let report = RunReport::new(
            &settings.base_url,
            started_at,
            summary.clone(),
            runner.into_results(),
        );
        report
            .write_to(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(summary.exit_code())
}
