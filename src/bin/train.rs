use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use predict_wave::engine::NaiveEngine;
use predict_wave::pipeline::run_training;
use predict_wave::types::PipelineConfig;

/// 遍历配置中的 (文件, 预测步长) 网格并训练模型。
#[derive(Debug, Parser)]
#[command(name = "train")]
struct Args {
    /// 配置文件路径
    #[arg(long, default_value = "conf/config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = PipelineConfig::load(&args.config)
        .with_context(|| format!("加载配置 {}", args.config.display()))?;

    run_training(&config, &NaiveEngine).context("训练管线失败")?;
    Ok(())
}
