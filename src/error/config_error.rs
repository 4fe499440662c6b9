use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// YAML 解析失败
    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// 缺少必需的顶层配置键
    #[error("缺少必需配置键 '{key}'")]
    MissingKey { key: String },

    /// 无效的配置值
    #[error("无效配置 '{field}' = '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}
