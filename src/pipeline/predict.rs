//! 批量预测管线。
//!
//! 任务网格通过 rayon 并行执行。每个任务独立构建自己的窗口分区并加载
//! 模型, 失败的任务记录日志后跳过, 不影响其他任务; 全部任务结束后如有
//! 失败则整体返回错误, 进程退出码仍能反映失败。

use crate::dataset::{vstack_all, write_csv};
use crate::engine::{ForecastEngine, PREDICTION_COL};
use crate::error::{DataError, WaveError};
use crate::pipeline::{build_partitions, fs, model_dir, station_name, task_grid, Task};
use crate::types::PipelineConfig;
use crate::windowing::item_runs;
use rayon::prelude::*;
use tracing::{error, info};

pub fn run_prediction<E>(config: &PipelineConfig, engine: &E) -> Result<(), WaveError>
where
    E: ForecastEngine + Sync,
{
    let tasks = task_grid(config);
    let failures: Vec<String> = tasks
        .par_iter()
        .filter_map(|task| match run_predict_task(config, engine, task) {
            Ok(()) => None,
            Err(err) => {
                error!(
                    filepath = %task.filepath.display(),
                    horizon = task.prediction_length,
                    "预测任务失败: {err}"
                );
                Some(format!(
                    "{} (步长 {})",
                    task.filepath.display(),
                    task.prediction_length
                ))
            }
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(WaveError::InfrastructureError(format!(
            "{} 个预测任务失败: [{}]",
            failures.len(),
            failures.join(", ")
        )))
    }
}

/// 单个任务: 构建分区 -> 加载模型 -> 逐模型逐窗口预测 -> 落盘
fn run_predict_task<E: ForecastEngine>(
    config: &PipelineConfig,
    engine: &E,
    task: &Task,
) -> Result<(), WaveError> {
    let station = station_name(&task.filepath)?;
    let predict_dir = config
        .engine
        .predict_root
        .join(&station)
        .join(task.prediction_length.to_string());
    fs::ensure_dir(&predict_dir)?;

    info!(
        station = %station,
        horizon = task.prediction_length,
        "开始批量预测"
    );

    let partitions = build_partitions(config, task)?;
    let runs = item_runs(&partitions.test)?;
    if runs.is_empty() {
        return Err(DataError::EmptyPartition {
            partition: "test".to_string(),
            context: format!("{station} 步长 {}", task.prediction_length),
        }
        .into());
    }

    let model = engine.load(&model_dir(config, &station, task.prediction_length))?;
    let horizon = task.prediction_length;

    for model_name in &config.engine.models {
        // 每个窗口: 上下文行喂给后端, 预测值拼到实际观测区间旁边
        let mut frames = Vec::with_capacity(runs.len());
        for &(_, start, len) in &runs {
            let context = partitions.test.slice(start as i64, len - horizon);
            let mut observed = partitions
                .test
                .slice((start + len - horizon) as i64, horizon);
            let forecast = engine.predict(&model, &context, model_name)?;
            let predicted = forecast.column(PREDICTION_COL)?.clone();
            observed.with_column(predicted)?;
            frames.push(observed);
        }

        let mut result = vstack_all(frames)?.ok_or(DataError::EmptyWindowCollection {
            scanned: runs.len(),
        })?;
        write_csv(&mut result, &predict_dir.join(format!("{model_name}.csv")))?;
    }

    info!(
        station = %station,
        horizon = task.prediction_length,
        "批量预测完成"
    );
    Ok(())
}
