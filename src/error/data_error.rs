use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    /// 缺失必需的列
    #[error("缺失必需列 '{column}' (上下文: {context})")]
    MissingColumn { column: String, context: String },

    /// 列类型不符合预期
    #[error("列 '{column}' 必须是 Float64 (上下文: {context})")]
    InvalidColumnType { column: String, context: String },

    /// 数据行数不足以构成一个窗口
    #[error("数据行数 {rows} 小于窗口长度 {window_size}")]
    NotEnoughRows { rows: usize, window_size: usize },

    /// 扫描结束后没有任何窗口通过缺失值过滤, 拒绝拼接空窗口集合
    #[error("没有窗口通过缺失值过滤 (共扫描 {scanned} 个候选窗口)")]
    EmptyWindowCollection { scanned: usize },

    /// 划分结果中某个分区为空
    #[error("分区 '{partition}' 为空 (上下文: {context})")]
    EmptyPartition { partition: String, context: String },

    /// 无效的窗口参数
    #[error("无效参数 '{param_name}' = '{value}': {reason}")]
    InvalidParameter {
        param_name: String,
        value: String,
        reason: String,
    },
}
