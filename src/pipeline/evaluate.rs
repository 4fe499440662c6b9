//! 评估管线。
//!
//! 对每个任务重建测试分区, 加载已训练模型, 生成排行榜并写入
//! scores/<站点>/<步长>.csv。

use crate::dataset::write_csv;
use crate::engine::{ForecastEngine, Metric};
use crate::error::WaveError;
use crate::pipeline::{build_partitions, fs, model_dir, station_name, task_grid};
use crate::types::PipelineConfig;
use tracing::info;

pub fn run_evaluation<E: ForecastEngine>(
    config: &PipelineConfig,
    engine: &E,
) -> Result<(), WaveError> {
    for task in task_grid(config) {
        let station = station_name(&task.filepath)?;
        let scores_dir = config.engine.scores_root.join(&station);
        fs::ensure_dir(&scores_dir)?;

        info!(
            station = %station,
            horizon = task.prediction_length,
            "开始评估"
        );
        let partitions = build_partitions(config, &task)?;
        let model = engine.load(&model_dir(config, &station, task.prediction_length))?;
        let mut leaderboard = engine.evaluate(&model, &partitions.test, &Metric::LEADERBOARD)?;
        write_csv(
            &mut leaderboard,
            &scores_dir.join(format!("{}.csv", task.prediction_length)),
        )?;
    }
    Ok(())
}
