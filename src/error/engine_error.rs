use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// 模型目录不存在或句柄文件缺失
    #[error("无法加载模型 '{path}': {reason}")]
    ModelNotFound { path: String, reason: String },

    /// 请求了训练清单之外的模型名
    #[error("未知模型 '{name}', 可用模型: [{available:?}]")]
    UnknownModel {
        name: String,
        available: Vec<String>,
    },

    /// 输入数据集为空
    #[error("数据集为空 (上下文: {context})")]
    EmptyDataset { context: String },

    /// 序列长度不足以留出预测区间
    #[error("窗口 {item_id} 共 {actual_len} 行, 不足以留出 {prediction_length} 步预测区间")]
    SeriesTooShort {
        item_id: u32,
        actual_len: usize,
        prediction_length: usize,
    },

    /// 留出区间存在缺失的目标值
    #[error("窗口 {item_id} 的留出区间存在缺失目标值")]
    MissingHorizonValue { item_id: u32 },

    /// 上下文中没有任何可用观测
    #[error("没有可用的历史观测 (上下文: {context})")]
    NoObservedHistory { context: String },

    /// 模型句柄读写失败
    #[error("模型句柄读写失败: {0}")]
    HandleIo(String),
}
