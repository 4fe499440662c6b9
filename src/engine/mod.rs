//! 预报后端抽象。
//!
//! 训练、预测、排行榜与模型加载都通过 [`ForecastEngine`] 这层窄接口,
//! 窗口构建与管线编排不依赖任何具体模型实现, 可以用替身后端做单元测试。

pub mod metrics;
pub mod naive;

use crate::error::EngineError;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use naive::NaiveEngine;

/// 点预测列名, 与上游预测表的列名保持一致
pub const PREDICTION_COL: &str = "mean";

/// 排行榜指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Mae,
    Mase,
    Rmsle,
    Smape,
    Rmse,
}

impl Metric {
    /// 排行榜 CSV 中使用的列名
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Mae => "MAE",
            Metric::Mase => "MASE",
            Metric::Rmsle => "RMSLE",
            Metric::Smape => "SMAPE",
            Metric::Rmse => "RMSE",
        }
    }

    /// 评估管线默认导出的指标集
    pub const LEADERBOARD: [Metric; 5] = [
        Metric::Mae,
        Metric::Mase,
        Metric::Rmsle,
        Metric::Smape,
        Metric::Rmse,
    ];
}

/// 一次训练任务的完整描述, 镜像上游预报器的构造参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSpec {
    /// 预测步长
    pub prediction_length: usize,
    /// 目标列名
    pub target: String,
    /// 序列频率
    pub freq: String,
    /// 训练优化指标
    pub eval_metric: String,
    /// 模型输出目录
    pub path: PathBuf,
    /// 参与训练与预测的模型名清单
    pub models: Vec<String>,
}

/// 预报后端的窄接口。
///
/// 输入输出表的形状固定: 训练与评估输入是带 item_id 标签的窗口表,
/// 预测输入是单个窗口的上下文行, 预测输出是 item_id + 点预测两列,
/// 排行榜输出是每模型一行、每指标一列。内部实现对管线完全不透明。
pub trait ForecastEngine {
    type Model;

    /// 训练模型并写入 spec.path 下的模型目录。
    fn train(
        &self,
        train: &DataFrame,
        tuning: &DataFrame,
        spec: &TrainSpec,
    ) -> Result<Self::Model, EngineError>;

    /// 用一个窗口的上下文行生成 prediction_length 步点预测。
    fn predict(
        &self,
        model: &Self::Model,
        series: &DataFrame,
        model_name: &str,
    ) -> Result<DataFrame, EngineError>;

    /// 在窗口化数据集上生成排行榜。
    fn evaluate(
        &self,
        model: &Self::Model,
        data: &DataFrame,
        metrics: &[Metric],
    ) -> Result<DataFrame, EngineError>;

    /// 从模型目录恢复句柄。
    fn load(&self, path: &Path) -> Result<Self::Model, EngineError>;
}
