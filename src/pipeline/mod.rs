//! 管线编排: 遍历 (输入文件, 预测步长) 任务网格。
//!
//! 每个任务独立地从自己的测量表构建窗口集合, 任务之间不共享任何可变
//! 状态, 输出写入互不重叠的目录树。

pub mod evaluate;
pub mod fs;
pub mod predict;
pub mod train;

use crate::dataset::read_measurement_csv;
use crate::engine::TrainSpec;
use crate::error::{DataError, WaveError};
use crate::types::{PartitionSet, PipelineConfig, WindowParams};
use crate::windowing::{scan_windows, split_partitions};
use std::path::{Path, PathBuf};

pub use evaluate::run_evaluation;
pub use predict::run_prediction;
pub use train::run_training;

/// 一个 (输入文件, 预测步长) 任务
#[derive(Debug, Clone)]
pub struct Task {
    pub filepath: PathBuf,
    pub prediction_length: usize,
}

/// 配置里所有文件与所有步长的笛卡尔积
pub fn task_grid(config: &PipelineConfig) -> Vec<Task> {
    let mut tasks = Vec::new();
    for filepath in &config.data.filepaths {
        for &prediction_length in &config.data.prediction_lengths {
            tasks.push(Task {
                filepath: filepath.clone(),
                prediction_length,
            });
        }
    }
    tasks
}

/// 文件名去掉扩展名后作为站点标识, 如 data/ndbc/41008.csv -> "41008"
pub fn station_name(path: &Path) -> Result<String, WaveError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            WaveError::InfrastructureError(format!("无法从路径提取站点名: {}", path.display()))
        })
}

/// 站点 + 步长对应的模型目录
pub fn model_dir(config: &PipelineConfig, station: &str, prediction_length: usize) -> PathBuf {
    config
        .engine
        .models_root
        .join(station)
        .join(prediction_length.to_string())
}

/// 为一个任务构造训练描述
pub fn train_spec(config: &PipelineConfig, task: &Task, station: &str) -> TrainSpec {
    TrainSpec {
        prediction_length: task.prediction_length,
        target: config.data.target_column.clone(),
        freq: config.engine.freq.clone(),
        eval_metric: config.engine.eval_metric.clone(),
        path: model_dir(config, station, task.prediction_length),
        models: config.engine.models.clone(),
    }
}

/// 任务的完整数据准备: 读表 -> 窗口扫描 -> 分区切分。
/// 每次调用都从头构建, 不同任务之间没有共享状态。
pub fn build_partitions(config: &PipelineConfig, task: &Task) -> Result<PartitionSet, WaveError> {
    let table = read_measurement_csv(&task.filepath)?;
    // 时间戳列必须存在, 下游后端以 item_id + 时间戳定位每一行
    if table.column(&config.data.timestamp_column).is_err() {
        return Err(DataError::MissingColumn {
            column: config.data.timestamp_column.clone(),
            context: format!("读取 {}", task.filepath.display()),
        }
        .into());
    }
    let params = WindowParams::new(config.context_length, task.prediction_length);
    let windows = scan_windows(&table, &config.data.target_column, &params)?;
    split_partitions(&windows, &config.training)
}
