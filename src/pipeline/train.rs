//! 训练管线。
//!
//! 顺序遍历任务网格: 每个 (文件, 步长) 组合读取测量表、构建窗口分区,
//! 然后把训练集与验证集交给预报后端, 模型写入 models/<站点>/<步长>/。

use crate::engine::ForecastEngine;
use crate::error::WaveError;
use crate::pipeline::{build_partitions, fs, station_name, task_grid, train_spec};
use crate::types::PipelineConfig;
use tracing::info;

pub fn run_training<E: ForecastEngine>(
    config: &PipelineConfig,
    engine: &E,
) -> Result<(), WaveError> {
    for task in task_grid(config) {
        let station = station_name(&task.filepath)?;
        let spec = train_spec(config, &task, &station);
        fs::ensure_dir(&spec.path)?;

        info!(
            station = %station,
            horizon = task.prediction_length,
            "开始训练"
        );
        let partitions = build_partitions(config, &task)?;
        engine.train(&partitions.train, &partitions.validation, &spec)?;
        info!(
            station = %station,
            horizon = task.prediction_length,
            "训练完成"
        );
    }
    Ok(())
}
