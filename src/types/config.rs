use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 必需的顶层配置键, 任何一个缺失都在处理开始前报错
const REQUIRED_KEYS: [&str; 3] = ["data", "training", "context-length"];

/// 管线全局配置, 进程启动时从 YAML 加载一次, 之后按引用传入各阶段。
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub data: DataConfig,
    pub training: TrainingConfig,
    #[serde(rename = "context-length")]
    pub context_length: usize,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// 输入数据配置
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// 输入 CSV 文件列表, 每个文件对应一个浮标站点
    pub filepaths: Vec<PathBuf>,
    /// 要扫描的预测步长列表
    pub prediction_lengths: Vec<usize>,
    /// 目标列名
    #[serde(default = "default_target_column")]
    pub target_column: String,
    /// 时间戳列名
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
}

/// 数据集划分比例
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TrainingConfig {
    pub train_size: f64,
    pub val_size: f64,
    pub test_size: f64,
}

/// 预报后端配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 序列频率 (如 "h" 表示逐小时)
    pub freq: String,
    /// 训练时的优化指标
    pub eval_metric: String,
    /// 预测阶段要遍历的模型名清单
    pub models: Vec<String>,
    /// 模型目录树根
    pub models_root: PathBuf,
    /// 预测结果目录树根
    pub predict_root: PathBuf,
    /// 排行榜目录树根
    pub scores_root: PathBuf,
}

fn default_target_column() -> String {
    "SWH".to_string()
}

fn default_timestamp_column() -> String {
    "timestamp".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freq: "h".to_string(),
            eval_metric: "RMSE".to_string(),
            models: default_models(),
            models_root: PathBuf::from("models"),
            predict_root: PathBuf::from("predict"),
            scores_root: PathBuf::from("scores"),
        }
    }
}

/// 默认模型清单, 与训练阶段的超参数表保持一致
fn default_models() -> Vec<String> {
    [
        "SeasonalNaive",
        "RecursiveTabular",
        "DirectTabular",
        "NPTS",
        "DynamicOptimizedTheta",
        "AutoETS",
        "ChronosZeroShot[bolt_base]",
        "ChronosFineTuned[bolt_small]",
        "TemporalFusionTransformer",
        "DeepAR",
        "PatchTST",
        "TiDE",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl PipelineConfig {
    /// 从文件加载并校验配置。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// 从 YAML 文本解析并校验配置。
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // 先检查必需的顶层键, 缺失时直接报出键名, 不进入字段级反序列化
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        for key in REQUIRED_KEYS {
            if value.get(key).is_none() {
                return Err(ConfigError::MissingKey {
                    key: key.to_string(),
                });
            }
        }

        let config: PipelineConfig = serde_yaml::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验所有配置值, 失败时返回包含字段名的错误。
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. 输入文件列表不能为空
        if self.data.filepaths.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.filepaths".to_string(),
                value: "[]".to_string(),
                reason: "至少需要一个输入文件".to_string(),
            });
        }

        // 2. 预测步长列表不能为空, 且每个步长 >= 1
        if self.data.prediction_lengths.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.prediction_lengths".to_string(),
                value: "[]".to_string(),
                reason: "至少需要一个预测步长".to_string(),
            });
        }
        for &length in &self.data.prediction_lengths {
            if length == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "data.prediction_lengths".to_string(),
                    value: length.to_string(),
                    reason: "预测步长必须 >= 1".to_string(),
                });
            }
        }

        // 3. 上下文长度 >= 1
        if self.context_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "context-length".to_string(),
                value: self.context_length.to_string(),
                reason: "上下文长度必须 >= 1".to_string(),
            });
        }

        // 4. 划分比例各自处于 [0, 1]; 不要求三者之和为 1
        self.training.validate()?;

        Ok(())
    }
}

impl TrainingConfig {
    /// 校验每个划分比例处于 [0, 1]。三者之和允许小于 1,
    /// 超出合并切点的窗口会被有意排除在所有分区之外。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("training.train_size", self.train_size),
            ("training.val_size", self.val_size),
            ("training.test_size", self.test_size),
        ];
        for (field, fraction) in fractions {
            if !(0.0..=1.0).contains(&fraction) || fraction.is_nan() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: fraction.to_string(),
                    reason: "划分比例必须处于 [0, 1]".to_string(),
                });
            }
        }
        Ok(())
    }
}
