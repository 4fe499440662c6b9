use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use predict_wave::engine::NaiveEngine;
use predict_wave::pipeline::run_prediction;
use predict_wave::types::PipelineConfig;

/// 并行遍历任务网格, 对测试分区做批量预测并落盘。
#[derive(Debug, Parser)]
#[command(name = "predict")]
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

    run_prediction(&config, &NaiveEngine).context("预测管线失败")?;
    Ok(())
}
