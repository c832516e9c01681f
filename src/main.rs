use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use examcraft::cli::Cli;
use examcraft::error::AppError;
use examcraft::models::model_catalog::MODEL_PRESETS;
use examcraft::models::SessionStatus;
use examcraft::utils::logging;
use examcraft::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_models {
        for (name, label) in MODEL_PRESETS {
            println!("{:<24} {}", name, label);
        }
        return Ok(());
    }

    // 加载配置：配置文件 < 环境变量 < 命令行
    let base = match &cli.config {
        Some(path) => Config::from_file(path)
            .context("加载配置文件失败")?
            .with_env(),
        None => Config::from_env(),
    };
    let config = cli.apply(base.context("读取环境变量失败")?);

    logging::init(config.verbose_logging);
    info!("配置加载完成，输出目录: {}", config.output_dir.display());

    let mut app = App::new(config, cli.credential());
    match app.run(&cli.run_options()).await {
        Ok(outcome) if outcome.status == SessionStatus::Failed => {
            std::process::exit(2);
        }
        Ok(_) => Ok(()),
        Err(AppError::Precondition(notice)) => {
            eprintln!("{}", notice);
            std::process::exit(1);
        }
        Err(e) => {
            error!("运行失败: {}", e);
            Err(e.into())
        }
    }
}
