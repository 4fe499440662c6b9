//! 持久化参考后端。
//!
//! 以上下文最后一个有效观测平推整个预测区间, 清单里的所有模型名共享这
//! 一份预报。它让训练/预测/评估管线在没有重量级模型栈的环境下也能
//! 端到端运行, 同时充当单元测试的替身后端, 不是对真实模型库的复刻。

use crate::engine::{metrics, ForecastEngine, Metric, TrainSpec, PREDICTION_COL};
use crate::error::EngineError;
use crate::windowing::{item_runs, ITEM_ID_COL};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 模型目录下的句柄文件名
const HANDLE_FILE: &str = "model.yaml";

/// 训练产出的模型句柄, 以 YAML 形式持久化在模型目录下。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveModel {
    pub spec: TrainSpec,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveEngine;

impl NaiveEngine {
    /// 目标列中最后一个有效观测 (null 与 NaN 均跳过)
    fn last_observed(values: &Float64Chunked) -> Option<f64> {
        let mut last = None;
        for value in values.iter() {
            if let Some(v) = value {
                if !v.is_nan() {
                    last = Some(v);
                }
            }
        }
        last
    }

    fn check_model_name(model: &NaiveModel, model_name: &str) -> Result<(), EngineError> {
        if model.spec.models.iter().any(|m| m == model_name) {
            Ok(())
        } else {
            Err(EngineError::UnknownModel {
                name: model_name.to_string(),
                available: model.spec.models.clone(),
            })
        }
    }
}

/// 单个窗口的指标得分; MASE 在历史尺度无定义时为 None
fn metric_score(metric: Metric, actual: &[f64], predicted: &[f64], history: &[f64]) -> Option<f64> {
    match metric {
        Metric::Mae => Some(metrics::mae(actual, predicted)),
        Metric::Rmse => Some(metrics::rmse(actual, predicted)),
        Metric::Rmsle => Some(metrics::rmsle(actual, predicted)),
        Metric::Smape => Some(metrics::smape(actual, predicted)),
        Metric::Mase => metrics::mase(actual, predicted, history),
    }
}

impl ForecastEngine for NaiveEngine {
    type Model = NaiveModel;

    fn train(
        &self,
        train: &DataFrame,
        tuning: &DataFrame,
        spec: &TrainSpec,
    ) -> Result<NaiveModel, EngineError> {
        if train.height() == 0 {
            return Err(EngineError::EmptyDataset {
                context: "train".to_string(),
            });
        }
        if tuning.height() == 0 {
            return Err(EngineError::EmptyDataset {
                context: "tuning".to_string(),
            });
        }
        // 目标列必须存在且为浮点
        train.column(&spec.target)?.f64()?;

        let model = NaiveModel { spec: spec.clone() };
        fs::create_dir_all(&spec.path).map_err(|e| EngineError::HandleIo(e.to_string()))?;
        let text = serde_yaml::to_string(&model).map_err(|e| EngineError::HandleIo(e.to_string()))?;
        fs::write(spec.path.join(HANDLE_FILE), text)
            .map_err(|e| EngineError::HandleIo(e.to_string()))?;
        Ok(model)
    }

    fn predict(
        &self,
        model: &NaiveModel,
        series: &DataFrame,
        model_name: &str,
    ) -> Result<DataFrame, EngineError> {
        Self::check_model_name(model, model_name)?;
        if series.height() == 0 {
            return Err(EngineError::EmptyDataset {
                context: "predict series".to_string(),
            });
        }

        let item_id = series
            .column(ITEM_ID_COL)?
            .u32()?
            .get(0)
            .ok_or_else(|| PolarsError::ComputeError("item_id 列不允许为 null".into()))?;
        let target = series.column(&model.spec.target)?.f64()?;
        let last = Self::last_observed(target).ok_or_else(|| EngineError::NoObservedHistory {
            context: format!("窗口 {item_id} 的上下文"),
        })?;

        let horizon = model.spec.prediction_length;
        let frame = DataFrame::new(vec![
            Series::new(ITEM_ID_COL.into(), vec![item_id; horizon]),
            Series::new(PREDICTION_COL.into(), vec![last; horizon]),
        ])?;
        Ok(frame)
    }

    fn evaluate(
        &self,
        model: &NaiveModel,
        data: &DataFrame,
        metrics: &[Metric],
    ) -> Result<DataFrame, EngineError> {
        let horizon = model.spec.prediction_length;
        let runs = item_runs(data)?;
        if runs.is_empty() {
            return Err(EngineError::EmptyDataset {
                context: "leaderboard".to_string(),
            });
        }

        // 逐窗口评分: 前段为历史, 末尾 horizon 行为留出区间
        let mut scores: Vec<Vec<f64>> = vec![Vec::new(); metrics.len()];
        for &(item_id, start, len) in &runs {
            if len <= horizon {
                return Err(EngineError::SeriesTooShort {
                    item_id,
                    actual_len: len,
                    prediction_length: horizon,
                });
            }
            let block = data.slice(start as i64, len);
            let target = block.column(&model.spec.target)?.f64()?;
            let values: Vec<Option<f64>> = target.iter().collect();

            let history: Vec<f64> = values[..len - horizon]
                .iter()
                .flatten()
                .copied()
                .filter(|v| !v.is_nan())
                .collect();
            let mut actual = Vec::with_capacity(horizon);
            for value in &values[len - horizon..] {
                match value {
                    Some(v) if !v.is_nan() => actual.push(*v),
                    _ => return Err(EngineError::MissingHorizonValue { item_id }),
                }
            }
            let last = history
                .last()
                .copied()
                .ok_or_else(|| EngineError::NoObservedHistory {
                    context: format!("窗口 {item_id} 的历史"),
                })?;
            let predicted = vec![last; horizon];

            for (slot, &metric) in scores.iter_mut().zip(metrics) {
                if let Some(score) = metric_score(metric, &actual, &predicted, &history) {
                    slot.push(score);
                }
            }
        }

        // 每个模型名一行; 参考后端对所有模型名输出同一份持久化预报得分
        let names: Vec<&str> = model.spec.models.iter().map(String::as_str).collect();
        let mut columns = vec![Series::new("model".into(), &names)];
        for (slot, &metric) in scores.iter().zip(metrics) {
            let averaged = if slot.is_empty() {
                None
            } else {
                Some(slot.iter().sum::<f64>() / slot.len() as f64)
            };
            let values: Vec<Option<f64>> = vec![averaged; names.len()];
            columns.push(Series::new(metric.name().into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }

    fn load(&self, path: &Path) -> Result<NaiveModel, EngineError> {
        let handle_path = path.join(HANDLE_FILE);
        let text = fs::read_to_string(&handle_path).map_err(|e| EngineError::ModelNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&text).map_err(|e| EngineError::HandleIo(e.to_string()))
    }
}
